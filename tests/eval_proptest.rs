//! Property tests for the evaluation pipeline's invariants.

use proptest::prelude::*;

use screval::agreement::{self, ContingencyTable};
use screval::annotation::{decode_row, AnnotatorRow};
use screval::consensus::consensus_line;
use screval::score::{accuracy, per_tag_counts};
use screval::Tag;

fn any_tag() -> impl Strategy<Value = Tag> {
    prop::sample::select(Tag::ALL.to_vec())
}

fn any_field() -> impl Strategy<Value = Option<String>> {
    prop::option::of(".{0,12}")
}

proptest! {
    #[test]
    fn test_contingency_rows_always_sum_to_three(
        triples in prop::collection::vec((any_tag(), any_tag(), any_tag()), 1..50)
    ) {
        let mut table = ContingencyTable::new();
        for (a, b, c) in triples {
            table.push_triple([a, b, c]);
        }
        for row in table.rows() {
            prop_assert_eq!(row.iter().sum::<u32>(), 3);
        }
    }

    #[test]
    fn test_consensus_is_plurality(a in any_tag(), b in any_tag(), c in any_tag()) {
        // The branch-ordered rule must equal true plurality with all-distinct
        // triples mapped to O.
        let expected = if a == b || a == c {
            a
        } else if b == c {
            b
        } else {
            Tag::O
        };
        let plurality = Tag::ALL
            .iter()
            .copied()
            .find(|t| [a, b, c].iter().filter(|&&x| x == *t).count() >= 2)
            .unwrap_or(Tag::O);
        prop_assert_eq!(consensus_line(a, b, c), expected);
        prop_assert_eq!(consensus_line(a, b, c), plurality);
    }

    #[test]
    fn test_decoder_is_total(
        line in prop::option::of(".{0,20}"),
        s in any_field(), n in any_field(), c in any_field(),
        d in any_field(), e in any_field(), t in any_field(),
    ) {
        // Never panics, and a blank line is always O.
        let row = AnnotatorRow { line: line.clone(), s, n, c, d, e, t };
        let tag = decode_row(&row);
        if line.map_or(true, |l| l.trim().is_empty()) {
            prop_assert_eq!(tag, Tag::O);
        }
    }

    #[test]
    fn test_agreement_pct_bounds(
        seqs in prop::collection::vec((any_tag(), any_tag(), any_tag()), 1..40)
    ) {
        let a1: Vec<Tag> = seqs.iter().map(|(a, _, _)| *a).collect();
        let a2: Vec<Tag> = seqs.iter().map(|(_, b, _)| *b).collect();
        let a3: Vec<Tag> = seqs.iter().map(|(_, _, c)| *c).collect();
        let movies = [("m".to_string(), [a1.as_slice(), a2.as_slice(), a3.as_slice()])];

        let summary = agreement::tally(&movies).unwrap();
        let pct = summary.pair_agreement_pct();
        prop_assert!((0.0..=100.0).contains(&pct));
        prop_assert_eq!(summary.total_pairs, 3 * seqs.len());

        let m = &summary.by_movie[0];
        prop_assert_eq!(m.lines(), seqs.len());
        // 100% pair agreement exactly when every line fully agrees.
        prop_assert_eq!(pct == 100.0, m.full == seqs.len());
    }

    #[test]
    fn test_unanimous_corpus_agrees_fully(tags in prop::collection::vec(any_tag(), 1..40)) {
        let movies = [("m".to_string(), [tags.as_slice(), tags.as_slice(), tags.as_slice()])];
        let summary = agreement::tally(&movies).unwrap();
        prop_assert_eq!(summary.pair_agreement_pct(), 100.0);
    }

    #[test]
    fn test_accuracy_bounds_and_self_agreement(
        cons in prop::collection::vec(any_tag(), 1..40),
        sys_seed in prop::collection::vec(any_tag(), 1..40),
    ) {
        // Pad/trim the system sequence to the consensus length.
        let sys: Vec<Tag> = (0..cons.len())
            .map(|i| sys_seed.get(i).copied().unwrap_or(Tag::O))
            .collect();

        let acc = accuracy("m", &cons, &sys).unwrap();
        prop_assert!(acc.pct() >= 0.0 && acc.pct() <= 100.0);

        let self_acc = accuracy("m", &cons, &cons).unwrap();
        prop_assert_eq!(self_acc.pct(), 100.0);
    }

    #[test]
    fn test_tag_counts_are_consistent(
        pairs in prop::collection::vec((any_tag(), any_tag()), 0..60)
    ) {
        let cons: Vec<Tag> = pairs.iter().map(|(c, _)| *c).collect();
        let sys: Vec<Tag> = pairs.iter().map(|(_, s)| *s).collect();
        let counts = per_tag_counts([(cons.as_slice(), sys.as_slice())]);

        let structural_matches = pairs
            .iter()
            .filter(|(c, s)| c == s && *c != Tag::O)
            .count();
        let total_tp: usize = counts.iter().map(|c| c.tp).sum();
        prop_assert_eq!(total_tp, structural_matches);

        for c in counts {
            // tp + fn = true instances of the tag in the consensus.
            let true_count = cons.iter().filter(|&&t| t == c.tag).count();
            prop_assert_eq!(c.tp + c.fn_, true_count);
            // tp + fp = predicted instances of the tag.
            let pred_count = sys.iter().filter(|&&t| t == c.tag).count();
            prop_assert_eq!(c.tp + c.fp, pred_count);

            for metric in [c.precision(), c.recall(), c.f1()] {
                if let Some(v) = metric {
                    prop_assert!((0.0..=1.0).contains(&v));
                }
            }
        }
    }
}

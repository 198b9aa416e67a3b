//! Chance-corrected inter-rater reliability statistics.
//!
//! Both statistics read the items × categories vote table built by
//! [`crate::agreement`] and return a scalar. They are plain functions so an
//! alternative implementation can be swapped in without touching the
//! pipeline.

use crate::agreement::ContingencyTable;

/// Fleiss' kappa over the vote table.
///
/// Every item is rated by the same number of raters (three here; the row-sum
/// invariant of [`ContingencyTable`]). Returns 1.0 for the degenerate cases
/// of an empty table or a chance-agreement term that saturates the
/// denominator.
#[must_use]
pub fn fleiss_kappa(table: &ContingencyTable) -> f64 {
    let rows = table.rows();
    if rows.is_empty() {
        return 1.0;
    }
    let n_raters = f64::from(rows[0].iter().sum::<u32>());
    if n_raters < 2.0 {
        return 1.0;
    }
    let n_items = rows.len() as f64;

    // P-bar: mean per-item agreement; column totals for the chance term.
    let mut p_bar = 0.0;
    let mut col_totals = [0.0f64; 7];
    for row in rows {
        let sum_sq: f64 = row.iter().map(|&c| f64::from(c) * f64::from(c)).sum();
        p_bar += (sum_sq - n_raters) / (n_raters * (n_raters - 1.0));
        for (j, &c) in row.iter().enumerate() {
            col_totals[j] += f64::from(c);
        }
    }
    p_bar /= n_items;

    let total_votes = n_items * n_raters;
    let p_e: f64 = col_totals
        .iter()
        .map(|&t| {
            let p = t / total_votes;
            p * p
        })
        .sum();

    if (1.0 - p_e).abs() < 1e-10 {
        1.0
    } else {
        (p_bar - p_e) / (1.0 - p_e)
    }
}

/// Krippendorff's alpha (nominal level) over the vote table.
///
/// Coincidence-matrix formulation from value counts: observed agreement is
/// the within-item pairing of identical votes, expected agreement comes
/// from the category marginals. Items with fewer than two votes are not
/// pairable and drop out.
#[must_use]
pub fn krippendorff_alpha(table: &ContingencyTable) -> f64 {
    let mut pairable = 0.0f64;
    let mut observed = 0.0f64;
    let mut marginals = [0.0f64; 7];

    for row in table.rows() {
        let n_u = f64::from(row.iter().sum::<u32>());
        if n_u < 2.0 {
            continue;
        }
        pairable += n_u;
        for (j, &c) in row.iter().enumerate() {
            let c = f64::from(c);
            observed += c * (c - 1.0) / (n_u - 1.0);
            marginals[j] += c;
        }
    }

    if pairable == 0.0 {
        return 1.0;
    }

    let a_o = observed / pairable;
    let a_e: f64 =
        marginals.iter().map(|&m| m * (m - 1.0)).sum::<f64>() / (pairable * (pairable - 1.0));

    if (1.0 - a_e).abs() < 1e-10 {
        1.0
    } else {
        (a_o - a_e) / (1.0 - a_e)
    }
}

use ndarray::{Array2, ArrayView1};

/// Squared Euclidean distance between two objective vectors.
pub fn squared_euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Symmetric matrix of pairwise squared Euclidean distances between rows.
/// The diagonal is zero.
pub fn pairwise_squared_euclidean(rows: &[ArrayView1<f64>]) -> Array2<f64> {
    let n = rows.len();
    let mut dists = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = squared_euclidean(&rows[i], &rows[j]);
            dists[[i, j]] = d;
            dists[[j, i]] = d;
        }
    }
    dists
}

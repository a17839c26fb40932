//! Serial and parallel traversal of a cell-index domain.
//!
//! Shared by [`GridShape2`](crate::GridShape2) and
//! [`GridShape3`](crate::GridShape3). Serial traversal is lexicographic with
//! the last index varying fastest; parallel traversal flattens the domain
//! into one range and splits it across the current rayon pool.

use rayon::prelude::*;

/// Visit `(i, j)` for `i` in `0..nx`, `j` in `0..ny`, `j` fastest.
pub(crate) fn for_each_index2(nx: usize, ny: usize, mut f: impl FnMut(usize, usize)) {
    for i in 0..nx {
        for j in 0..ny {
            f(i, j);
        }
    }
}

/// Visit `(i, j, k)` for every index in `[0, nx) x [0, ny) x [0, nz)`,
/// `k` fastest and `i` slowest.
pub(crate) fn for_each_index3(
    nx: usize,
    ny: usize,
    nz: usize,
    mut f: impl FnMut(usize, usize, usize),
) {
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                f(i, j, k);
            }
        }
    }
}

/// Visit every `(i, j)` exactly once in unspecified order.
pub(crate) fn par_for_each_index2(
    nx: usize,
    ny: usize,
    min_len: usize,
    f: impl Fn(usize, usize) + Sync + Send,
) {
    match nx.checked_mul(ny) {
        Some(total) => (0..total)
            .into_par_iter()
            .with_min_len(min_len)
            .for_each(|n| f(n / ny, n % ny)),
        None => (0..nx).into_par_iter().for_each(|i| {
            for j in 0..ny {
                f(i, j);
            }
        }),
    }
}

/// Visit every `(i, j, k)` exactly once in unspecified order.
pub(crate) fn par_for_each_index3(
    nx: usize,
    ny: usize,
    nz: usize,
    min_len: usize,
    f: impl Fn(usize, usize, usize) + Sync + Send,
) {
    let total = ny.checked_mul(nz).and_then(|plane| plane.checked_mul(nx));
    match total {
        Some(total) => {
            let plane = ny * nz;
            (0..total)
                .into_par_iter()
                .with_min_len(min_len)
                .for_each(|n| {
                    let i = n / plane;
                    let rem = n % plane;
                    f(i, rem / nz, rem % nz);
                })
        }
        // Domain too large to flatten: split on the outermost axis only.
        None => (0..nx).into_par_iter().for_each(|i| {
            for j in 0..ny {
                for k in 0..nz {
                    f(i, j, k);
                }
            }
        }),
    }
}

use crate::genetic::SelectionError;
use crate::random::RandomGenerator;

/// Selects the k-th smallest value (1-indexed) of `values` without sorting,
/// in expected linear time, partitioning in place around uniformly random
/// pivots. Duplicate values may land on either side of a pivot; correctness
/// does not depend on strict separation.
pub fn randomized_select(
    values: &mut [f64],
    k: usize,
    rng: &mut dyn RandomGenerator,
) -> Result<f64, SelectionError> {
    if values.is_empty() {
        return Err(SelectionError::EmptyInput(
            "k-th order statistic of an empty slice".to_string(),
        ));
    }
    if k == 0 || k > values.len() {
        return Err(SelectionError::CapacityViolation(format!(
            "order statistic {} out of range for {} values",
            k,
            values.len()
        )));
    }

    let mut begin = 0;
    let mut end = values.len() - 1;
    let mut k = k;
    loop {
        if begin == end {
            return Ok(values[begin]);
        }
        let q = randomized_partition(values, begin, end, rng);
        let left = q - begin + 1;
        if k <= left {
            end = q;
        } else {
            begin = q + 1;
            k -= left;
        }
    }
}

fn randomized_partition(
    values: &mut [f64],
    begin: usize,
    end: usize,
    rng: &mut dyn RandomGenerator,
) -> usize {
    let pivot = rng.gen_range_usize(begin, end + 1);
    values.swap(begin, pivot);
    partition(values, begin, end)
}

/// Hoare partition around `values[begin]`. Returns `j` with
/// `begin <= j < end` such that `values[begin..=j]` holds values no greater
/// than every value in `values[j+1..=end]`.
fn partition(values: &mut [f64], begin: usize, end: usize) -> usize {
    let x = values[begin];
    let mut i = begin as isize - 1;
    let mut j = end as isize + 1;
    loop {
        loop {
            j -= 1;
            if values[j as usize] <= x {
                break;
            }
        }
        loop {
            i += 1;
            if values[i as usize] >= x {
                break;
            }
        }
        if i < j {
            values.swap(i as usize, j as usize);
        } else {
            return j as usize;
        }
    }
}

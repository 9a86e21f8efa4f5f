//! Serial and fork-join merge sort.
//!
//! [`merge_sort`] is the single-threaded reference implementation;
//! [`parallel_merge_sort`] produces identical output for every input
//! by forking subranges onto a [`ThreadPool`] down to a fixed depth
//! and joining both halves before each merge.

use std::slice;

use crate::thread_pool::ThreadPool;
use crate::Result;

/// Sorts a slice ascending with a single-threaded merge sort.
pub fn merge_sort<T: PartialOrd + Clone>(arr: &mut [T]) {
    if arr.len() > 1 {
        merge_sort_range(arr, 0, arr.len() - 1);
    }
}

/// Recursively sorts `arr[left..=right]`.
fn merge_sort_range<T: PartialOrd + Clone>(arr: &mut [T], left: usize, right: usize) {
    if left < right {
        let mid = left + (right - left) / 2;
        merge_sort_range(arr, left, mid);
        merge_sort_range(arr, mid + 1, right);
        merge(arr, left, mid, right);
    }
}

/// Merges the sorted runs `arr[left..=mid]` and `arr[mid+1..=right]`
/// back into `arr[left..=right]`.
fn merge<T: PartialOrd + Clone>(arr: &mut [T], left: usize, mid: usize, right: usize) {
    let lower = arr[left..=mid].to_vec();
    let upper = arr[mid + 1..=right].to_vec();

    let mut i = 0;
    let mut j = 0;
    let mut k = left;

    while i < lower.len() && j < upper.len() {
        // `<=` keeps equal elements in their original order.
        if lower[i] <= upper[j] {
            arr[k] = lower[i].clone();
            i += 1;
        } else {
            arr[k] = upper[j].clone();
            j += 1;
        }
        k += 1;
    }
    while i < lower.len() {
        arr[k] = lower[i].clone();
        i += 1;
        k += 1;
    }
    while j < upper.len() {
        arr[k] = upper[j].clone();
        j += 1;
        k += 1;
    }
}

/// Sorts a slice ascending, forking subranges onto the pool's workers.
///
/// `parallelism` is the target number of concurrently sorted
/// subranges: recursion forks pool jobs for `ceil(log2(parallelism))`
/// levels and sorts serially below that, so at most `2^levels`
/// subtasks are ever outstanding. Scheduling never affects the output,
/// which is identical to [`merge_sort`] on the same input.
///
/// `parallelism` must not exceed the pool's worker count: forked
/// parents block inside workers waiting on their halves, and with too
/// few workers left the leaf tasks can starve.
///
/// # Errors
///
/// Fails with [`PoolError::PoolStopped`](crate::PoolError::PoolStopped)
/// if the pool is shut down while the sort is running.
pub fn parallel_merge_sort<P, T>(pool: &P, arr: &mut [T], parallelism: u32) -> Result<()>
where
    P: ThreadPool,
    T: PartialOrd + Clone + Send + 'static,
{
    if arr.len() > 1 {
        let max_depth = fork_depth(parallelism);
        let last = arr.len() - 1;
        let raw = RawSlice {
            ptr: arr.as_mut_ptr(),
        };
        sort_range(pool, raw, 0, last, 0, max_depth)?;
    }
    Ok(())
}

/// Number of fork levels needed so `2^depth` covers the target
/// parallelism.
fn fork_depth(parallelism: u32) -> u32 {
    let mut depth = 0;
    let mut width = 1u32;
    while width < parallelism {
        width *= 2;
        depth += 1;
    }
    depth
}

/// An unchecked view of the array shared by forked subtasks.
///
/// Concurrent subtasks only ever materialize disjoint `[left, right]`
/// ranges, and every fork is joined before its parent merges, so no
/// two threads touch an index at the same time. The pointer cannot
/// outlive the caller's borrow: [`parallel_merge_sort`] blocks until
/// the whole fork tree has completed.
struct RawSlice<T> {
    ptr: *mut T,
}

impl<T> RawSlice<T> {
    /// # Safety
    ///
    /// `[left, right]` must be in bounds and disjoint from every range
    /// materialized by a concurrently running subtask.
    unsafe fn range_mut(&self, left: usize, right: usize) -> &mut [T] {
        slice::from_raw_parts_mut(self.ptr.add(left), right - left + 1)
    }
}

impl<T> Clone for RawSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawSlice<T> {}

// Subtasks write disjoint ranges; see the type-level invariant above.
unsafe impl<T: Send> Send for RawSlice<T> {}

fn sort_range<P, T>(
    pool: &P,
    arr: RawSlice<T>,
    left: usize,
    right: usize,
    depth: u32,
    max_depth: u32,
) -> Result<()>
where
    P: ThreadPool,
    T: PartialOrd + Clone + Send + 'static,
{
    if left >= right {
        return Ok(());
    }
    let mid = left + (right - left) / 2;

    if depth < max_depth {
        let lower_pool = pool.clone();
        let lower = pool.submit(move || {
            sort_range(&lower_pool, arr, left, mid, depth + 1, max_depth)
        })?;
        let upper_pool = pool.clone();
        let upper = match pool.submit(move || {
            sort_range(&upper_pool, arr, mid + 1, right, depth + 1, max_depth)
        }) {
            Ok(handle) => handle,
            Err(e) => {
                // The first fork is already running; wait it out before
                // surfacing the error so the raw view cannot dangle.
                let _ = lower.join();
                return Err(e);
            }
        };
        let lower_result = lower.join();
        let upper_result = upper.join();
        lower_result??;
        upper_result??;
    } else {
        // SAFETY: no other subtask touches [left, right] while this
        // one runs.
        let halves = unsafe { arr.range_mut(left, right) };
        let (lower_half, upper_half) = halves.split_at_mut(mid - left + 1);
        merge_sort(lower_half);
        merge_sort(upper_half);
    }

    // SAFETY: both halves are done (joined above or sorted in-thread),
    // so this task is again the only one touching [left, right].
    let run = unsafe { arr.range_mut(left, right) };
    merge(run, 0, mid - left, right - left);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_depth_covers_parallelism() {
        assert_eq!(fork_depth(0), 0);
        assert_eq!(fork_depth(1), 0);
        assert_eq!(fork_depth(2), 1);
        assert_eq!(fork_depth(3), 2);
        assert_eq!(fork_depth(4), 2);
        assert_eq!(fork_depth(8), 3);
        assert_eq!(fork_depth(300), 9);
    }

    #[test]
    fn merge_joins_two_sorted_runs() {
        let mut arr = vec![1, 4, 9, 2, 3, 8];
        merge(&mut arr, 0, 2, 5);
        assert_eq!(arr, vec![1, 2, 3, 4, 8, 9]);
    }

    #[test]
    fn merge_respects_range_bounds() {
        let mut arr = vec![7, 3, 5, 2, 6, 0];
        merge(&mut arr, 1, 2, 4);
        assert_eq!(arr, vec![7, 2, 3, 5, 6, 0]);
    }

    #[test]
    fn serial_sort_handles_small_inputs() {
        let mut empty: Vec<i32> = vec![];
        merge_sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42];
        merge_sort(&mut single);
        assert_eq!(single, vec![42]);

        let mut pair = vec![2, 1];
        merge_sort(&mut pair);
        assert_eq!(pair, vec![1, 2]);
    }
}

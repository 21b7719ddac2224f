//! Group-stage partitioning.
//!
//! Entrants are split into groups of 2 or 3, filling groups to 3 before
//! leaving any at 2. For N entrants the plan uses `ceil(N / 3)` groups,
//! of which `3 * total - N` hold 2 teams and the rest hold 3.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupingError {
    #[error("at least 2 entrants are required to form groups, got {0}")]
    TooFewEntrants(usize),
}

/// Group-size distribution for a division draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub total_groups: usize,
    pub groups_of_three: usize,
    pub groups_of_two: usize,
}

impl GroupPlan {
    /// Sizes in assignment order: 3-groups first, then 2-groups.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![3; self.groups_of_three];
        sizes.extend(std::iter::repeat(2).take(self.groups_of_two));
        sizes
    }
}

/// Compute the group-size distribution for `n` entrants.
///
/// ```
/// use infra::grouping::plan_groups;
///
/// let plan = plan_groups(7).unwrap();
/// assert_eq!(plan.total_groups, 3);
/// assert_eq!(plan.sizes(), vec![3, 2, 2]);
/// ```
pub fn plan_groups(n: usize) -> Result<GroupPlan, GroupingError> {
    if n < 2 {
        return Err(GroupingError::TooFewEntrants(n));
    }

    let total_groups = n.div_ceil(3);
    let groups_of_two = 3 * total_groups - n;

    Ok(GroupPlan {
        total_groups,
        groups_of_three: total_groups - groups_of_two,
        groups_of_two,
    })
}

/// Spreadsheet-style label for the group at `index`: A, B, ... Z, AA, AB, ...
pub fn group_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Partition `entrants` into groups per [`plan_groups`], preserving input
/// order within and across groups.
pub fn assign_groups<T: Clone>(entrants: &[T]) -> Result<Vec<Vec<T>>, GroupingError> {
    let plan = plan_groups(entrants.len())?;

    let mut groups = Vec::with_capacity(plan.total_groups);
    let mut cursor = 0;
    for size in plan.sizes() {
        groups.push(entrants[cursor..cursor + size].to_vec());
        cursor += size;
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_two_entrants() {
        assert_eq!(plan_groups(0), Err(GroupingError::TooFewEntrants(0)));
        assert_eq!(plan_groups(1), Err(GroupingError::TooFewEntrants(1)));
    }

    #[test]
    fn seven_entrants_split_three_two_two() {
        let plan = plan_groups(7).unwrap();
        assert_eq!(plan.total_groups, 3);
        assert_eq!(plan.groups_of_three, 1);
        assert_eq!(plan.groups_of_two, 2);
        assert_eq!(plan.sizes(), vec![3, 2, 2]);
    }

    #[test]
    fn sizes_always_sum_to_n_and_stay_in_range() {
        for n in 2..=100 {
            let plan = plan_groups(n).unwrap();
            let sizes = plan.sizes();
            assert_eq!(sizes.iter().sum::<usize>(), n, "n = {n}");
            assert!(sizes.iter().all(|s| *s == 2 || *s == 3), "n = {n}");
            assert_eq!(sizes.len(), plan.total_groups, "n = {n}");
        }
    }

    #[test]
    fn assignment_preserves_order_and_membership() {
        let entrants: Vec<u32> = (0..8).collect();
        let groups = assign_groups(&entrants).unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], vec![0, 1, 2]);
        assert_eq!(groups[1], vec![3, 4, 5]);
        assert_eq!(groups[2], vec![6, 7]);
    }

    #[test]
    fn labels_follow_spreadsheet_order() {
        assert_eq!(group_label(0), "A");
        assert_eq!(group_label(1), "B");
        assert_eq!(group_label(25), "Z");
        assert_eq!(group_label(26), "AA");
        assert_eq!(group_label(27), "AB");
    }
}

use serde::Serialize;

pub const TOTAL_DAYS: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Yellow,
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DayTask {
    pub day: u8,
    pub title: &'static str,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Week {
    pub name: &'static str,
    pub days: &'static [DayTask],
}

const fn task(day: u8, title: &'static str, category: Category) -> DayTask {
    DayTask {
        day,
        title,
        category,
    }
}

use Category::{Green, Red, Yellow};

pub static WEEKS: [Week; 5] = [
    Week {
        name: "Week 1",
        days: &[
            task(1, "Costing: Marginal Costing", Yellow),
            task(2, "Costing: Standard Costing", Yellow),
            task(3, "Costing: Process Costing", Yellow),
            task(4, "FM: Capital Budgeting", Yellow),
            task(5, "FM: Leverages + Cost of Capital", Yellow),
            task(6, "FM: Working Capital", Yellow),
            task(7, "Audit (Full Focus)", Red),
        ],
    },
    Week {
        name: "Week 2",
        days: &[
            task(8, "Costing: ABC + Cost Sheet", Yellow),
            task(9, "Costing: Contract + Operating Costing", Yellow),
            task(10, "Audit SA Day", Red),
            task(11, "Audit: Company Audit + Vouching", Red),
            task(12, "FM: Ratios + Portfolio Theory", Yellow),
            task(13, "SM: Leadership + Motivation", Green),
            task(14, "SM: Strategy Models", Green),
        ],
    },
    Week {
        name: "Week 3",
        days: &[
            task(15, "Costing Full Revision", Yellow),
            task(16, "FM Full Revision", Yellow),
            task(17, "Audit Weak Revision Day", Red),
            task(18, "Special Audits", Red),
            task(19, "SM Revision", Green),
            task(20, "Costing + FM Mixed Practice", Yellow),
            task(21, "Audit Mock (3 hrs)", Red),
        ],
    },
    Week {
        name: "Week 4",
        days: &[
            task(22, "Costing Final Revision", Yellow),
            task(23, "FM Final Revision", Yellow),
            task(24, "Audit Final Revision", Red),
            task(25, "SM Final Revision", Green),
        ],
    },
    Week {
        name: "Final 5 Days",
        days: &[
            task(26, "Costing Mock", Yellow),
            task(27, "Audit Mock", Red),
            task(28, "FM Mock", Yellow),
            task(29, "SM Mock", Green),
            task(30, "Final Revision", Green),
        ],
    },
];

pub fn is_valid_day(day: u8) -> bool {
    (1..=TOTAL_DAYS).contains(&day)
}

pub fn find_day(day: u8) -> Option<&'static DayTask> {
    WEEKS
        .iter()
        .flat_map(|week| week.days.iter())
        .find(|task| task.day == day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_partition_days_in_order() {
        let days: Vec<u8> = WEEKS
            .iter()
            .flat_map(|week| week.days.iter().map(|task| task.day))
            .collect();
        let expected: Vec<u8> = (1..=TOTAL_DAYS).collect();
        assert_eq!(days, expected);
    }

    #[test]
    fn find_day_rejects_out_of_range() {
        assert_eq!(find_day(7).map(|task| task.category), Some(Category::Red));
        assert!(find_day(0).is_none());
        assert!(find_day(31).is_none());
        assert!(!is_valid_day(0));
        assert!(is_valid_day(30));
    }
}

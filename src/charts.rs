//! The progress page's datasets. These are fixed display figures, not
//! derived from the live collections.

/// One slice of the skill-distribution chart: category and share in
/// percent.
#[derive(Debug, Clone, Copy)]
pub struct DistributionSlice {
    pub category: &'static str,
    pub percent: u8,
}

pub const SKILL_DISTRIBUTION: [DistributionSlice; 5] = [
    DistributionSlice { category: "Programming", percent: 35 },
    DistributionSlice { category: "Communication", percent: 20 },
    DistributionSlice { category: "Leadership", percent: 15 },
    DistributionSlice { category: "Design", percent: 20 },
    DistributionSlice { category: "Analytics", percent: 10 },
];

/// Entity counts per category behind the grouped bars.
#[derive(Debug, Clone, Copy)]
pub struct CategoryCounts {
    pub category: &'static str,
    pub skills: u8,
    pub projects: u8,
    pub certificates: u8,
}

pub const CATEGORY_COUNTS: [CategoryCounts; 5] = [
    CategoryCounts { category: "Programming", skills: 8, projects: 5, certificates: 3 },
    CategoryCounts { category: "Communication", skills: 4, projects: 2, certificates: 1 },
    CategoryCounts { category: "Leadership", skills: 3, projects: 1, certificates: 2 },
    CategoryCounts { category: "Design", skills: 5, projects: 3, certificates: 2 },
    CategoryCounts { category: "Analytics", skills: 2, projects: 1, certificates: 1 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_covers_the_whole_portfolio() {
        let total: u32 = SKILL_DISTRIBUTION.iter().map(|s| u32::from(s.percent)).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn both_charts_agree_on_categories() {
        let a: Vec<&str> = SKILL_DISTRIBUTION.iter().map(|s| s.category).collect();
        let b: Vec<&str> = CATEGORY_COUNTS.iter().map(|c| c.category).collect();
        assert_eq!(a, b);
    }
}

//! Canned dashboard content.
//!
//! Everything here is static presentation data: module cards keyed by section
//! name, the recent-activity feed and the quick tool buttons. Front ends decide
//! how to draw it.

use std::time::Duration;

use crate::utils::title_case;

/// Simulated fetch delay before module content appears
pub const MODULE_LOAD_DELAY: Duration = Duration::from_millis(500);

/// Filter value that shows the whole activity feed
pub const ALL_ACTIVITIES: &str = "All Activities";

/// Choices offered by the activity filter, in display order
pub const ACTIVITY_FILTERS: &[&str] = &[ALL_ACTIVITIES, "Training", "Hiring", "Leave"];

/// Sidebar sections, in display order
pub const NAV_SECTIONS: &[&str] = &["dashboard", "training", "hiring", "employees", "reports"];

pub const QUICK_TOOLS: &[&str] = &[
    "New Application",
    "Schedule Training",
    "Generate Report",
    "Leave Requests",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Landing view; also shows quick tools and recent activity
    Dashboard,
    Module(String),
}

impl Section {
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        if name.is_empty() || name == "dashboard" {
            Section::Dashboard
        } else {
            Section::Module(name)
        }
    }

    pub fn shows_quick_tools(&self) -> bool {
        matches!(self, Section::Dashboard)
    }

    pub fn name(&self) -> &str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Module(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleCard {
    pub title: String,
    pub description: Option<String>,
    pub progress_percent: Option<u8>,
    pub stages: Vec<Stage>,
    pub stats: Vec<String>,
    pub features: Vec<String>,
}

/// Cards for a module section. Unknown names get a generic placeholder card.
pub fn module_content(module: &str) -> Vec<ModuleCard> {
    match module {
        "training" => vec![
            training_card("Student Training", 65, 24, 12, 8),
            training_card("Employee Training", 42, 18, 24, 5),
        ],
        "hiring" => vec![ModuleCard {
            title: "Current Hiring Process".to_string(),
            stages: ["Applications", "NATS Verification", "Committee Review", "Final Approval"]
                .iter()
                .enumerate()
                .map(|(i, name)| Stage {
                    name: *name,
                    active: i == 0,
                })
                .collect(),
            stats: vec![
                "56 Applications".to_string(),
                "12 Shortlisted".to_string(),
                "4 Positions".to_string(),
            ],
            ..Default::default()
        }],
        other => vec![ModuleCard {
            title: format!("{} Module", title_case(other)),
            description: Some(format!(
                "This section contains all {} related functionality.",
                other
            )),
            features: vec![
                format!("Sample content for {} module would appear here.", other),
                "Feature 1".to_string(),
                "Feature 2".to_string(),
                "Feature 3".to_string(),
            ],
            ..Default::default()
        }],
    }
}

fn training_card(title: &str, percent: u8, ongoing: u32, completed: u32, upcoming: u32) -> ModuleCard {
    ModuleCard {
        title: title.to_string(),
        progress_percent: Some(percent),
        stats: vec![
            format!("{} Ongoing", ongoing),
            format!("{} Completed", completed),
            format!("{} Upcoming", upcoming),
        ],
        ..Default::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub category: &'static str,
    pub text: &'static str,
    pub when: &'static str,
}

pub fn activity_feed() -> Vec<ActivityItem> {
    vec![
        ActivityItem {
            category: "Training",
            text: "Training: Cyber hygiene batch 4 completed",
            when: "2 hours ago",
        },
        ActivityItem {
            category: "Hiring",
            text: "Hiring: 12 candidates shortlisted for interview",
            when: "5 hours ago",
        },
        ActivityItem {
            category: "Leave",
            text: "Leave: 3 requests awaiting approval",
            when: "Yesterday",
        },
        ActivityItem {
            category: "Training",
            text: "Training: New safety module scheduled",
            when: "2 days ago",
        },
    ]
}

/// Items matching a filter value: everything for `ALL_ACTIVITIES`, otherwise
/// a plain substring match on the item text
pub fn filter_activities<'a>(items: &'a [ActivityItem], filter: &str) -> Vec<&'a ActivityItem> {
    items
        .iter()
        .filter(|item| filter == ALL_ACTIVITIES || item.text.contains(filter))
        .collect()
}

pub fn quick_tool_action(action: &str) -> String {
    format!(
        "Action: {}\nThis would open the {} module in a real application.",
        action, action
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_parse() {
        assert_eq!(Section::parse("dashboard"), Section::Dashboard);
        assert_eq!(Section::parse(""), Section::Dashboard);
        assert_eq!(Section::parse(" Training "), Section::Module("training".to_string()));
        assert!(Section::Dashboard.shows_quick_tools());
        assert!(!Section::parse("hiring").shows_quick_tools());
    }

    #[test]
    fn test_training_content() {
        let cards = module_content("training");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Student Training");
        assert_eq!(cards[0].progress_percent, Some(65));
        assert_eq!(cards[1].stats, vec!["18 Ongoing", "24 Completed", "5 Upcoming"]);
    }

    #[test]
    fn test_hiring_content_first_stage_active() {
        let cards = module_content("hiring");
        let stages = &cards[0].stages;
        assert_eq!(stages.len(), 4);
        assert!(stages[0].active);
        assert!(stages[1..].iter().all(|s| !s.active));
        assert_eq!(stages[1].name, "NATS Verification");
    }

    #[test]
    fn test_unknown_module_gets_placeholder() {
        let cards = module_content("reports");
        assert_eq!(cards[0].title, "Reports Module");
        assert_eq!(
            cards[0].description.as_deref(),
            Some("This section contains all reports related functionality.")
        );
        assert_eq!(cards[0].features.len(), 4);
    }

    #[test]
    fn test_filter_activities() {
        let feed = activity_feed();
        assert_eq!(filter_activities(&feed, ALL_ACTIVITIES).len(), feed.len());
        assert_eq!(filter_activities(&feed, "Training").len(), 2);
        assert!(filter_activities(&feed, "Payroll").is_empty());
    }

    #[test]
    fn test_every_filter_choice_matches_something() {
        let feed = activity_feed();
        for filter in ACTIVITY_FILTERS {
            assert!(!filter_activities(&feed, filter).is_empty(), "{}", filter);
        }
    }

    #[test]
    fn test_nav_sections_start_with_dashboard() {
        assert_eq!(Section::parse(NAV_SECTIONS[0]), Section::Dashboard);
        assert!(NAV_SECTIONS[1..]
            .iter()
            .all(|name| matches!(Section::parse(name), Section::Module(_))));
    }

    #[test]
    fn test_quick_tool_action() {
        assert_eq!(
            quick_tool_action("Generate Report"),
            "Action: Generate Report\nThis would open the Generate Report module in a real application."
        );
    }
}

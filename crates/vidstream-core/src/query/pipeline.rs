//! Typed list-query pipeline
//!
//! Every list endpoint runs the same execution plan:
//! match -> lookup -> unwind -> project -> sort -> paginate.
//! Stages are a closed set of variants so malformed stage shapes cannot
//! be constructed, and the executor applies them in the fixed order
//! above regardless of the order the caller supplied them in.

use crate::query::page::PageRequest;
use crate::value_objects::Snowflake;

/// Sort direction for the sort stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse the `sortType` query parameter; anything other than "asc"
    /// means descending
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A bindable filter value; only these shapes reach the store
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Id(Snowflake),
    Text(String),
    Flag(bool),
    Int(i64),
}

/// Filter input for the match stage
///
/// `equals` are exact field matches; `contains` is an any-of
/// case-insensitive substring match over the named text fields, used
/// for free-text `query` parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchFilter {
    pub equals: Vec<(String, FilterValue)>,
    pub contains: Option<ContainsFilter>,
}

/// Case-insensitive substring filter over one or more text fields
#[derive(Debug, Clone, PartialEq)]
pub struct ContainsFilter {
    pub fields: Vec<String>,
    pub needle: String,
}

impl MatchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match condition
    pub fn eq(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.equals.push((field.into(), value));
        self
    }

    /// Set the free-text substring condition
    pub fn contains(mut self, fields: Vec<String>, needle: impl Into<String>) -> Self {
        self.contains = Some(ContainsFilter {
            fields,
            needle: needle.into(),
        });
        self
    }

    /// True when no condition was set
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.contains.is_none()
    }
}

/// One step of the execution plan
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStage {
    /// Filter rows by equality and substring conditions
    Match(MatchFilter),
    /// Left-join one foreign row set per local row
    Lookup {
        from: String,
        local_key: String,
        foreign_key: String,
        alias: String,
    },
    /// Require exactly one joined row per local row; rows without a
    /// join partner are dropped (inner-join semantics)
    Unwind { alias: String },
    /// Restrict output to the named columns
    Project(Vec<String>),
    /// Order rows; when absent the executor defaults to
    /// `created_at` descending
    Sort {
        key: String,
        direction: SortDirection,
    },
    /// Window the final row set; always applied last so totals reflect
    /// the post-filter count
    Paginate(PageRequest),
}

impl PipelineStage {
    /// Fixed execution rank: match=0 .. paginate=5
    pub fn rank(&self) -> u8 {
        match self {
            Self::Match(_) => 0,
            Self::Lookup { .. } => 1,
            Self::Unwind { .. } => 2,
            Self::Project(_) => 3,
            Self::Sort { .. } => 4,
            Self::Paginate(_) => 5,
        }
    }
}

/// Order stages into the fixed execution order, preserving relative
/// order of stages of the same kind
pub fn order_stages(mut stages: Vec<PipelineStage>) -> Vec<PipelineStage> {
    stages.sort_by_key(PipelineStage::rank);
    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("anything"), SortDirection::Desc);
    }

    #[test]
    fn test_match_filter_builder() {
        let filter = MatchFilter::new()
            .eq("owner_id", FilterValue::Id(Snowflake::new(1)))
            .contains(vec!["title".to_string(), "description".to_string()], "rust");

        assert_eq!(filter.equals.len(), 1);
        let contains = filter.contains.as_ref().unwrap();
        assert_eq!(contains.needle, "rust");
        assert_eq!(contains.fields.len(), 2);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_empty_match_filter() {
        assert!(MatchFilter::new().is_empty());
    }

    #[test]
    fn test_stages_reordered_into_fixed_order() {
        let page = PageRequest::default();
        let stages = vec![
            PipelineStage::Paginate(page),
            PipelineStage::Sort {
                key: "created_at".to_string(),
                direction: SortDirection::Desc,
            },
            PipelineStage::Unwind {
                alias: "owner".to_string(),
            },
            PipelineStage::Match(MatchFilter::new()),
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "owner_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "owner".to_string(),
            },
        ];

        let ordered = order_stages(stages);
        let ranks: Vec<u8> = ordered.iter().map(PipelineStage::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 4, 5]);
    }

    #[test]
    fn test_same_kind_stages_keep_relative_order() {
        let first = PipelineStage::Match(MatchFilter::new().eq("a", FilterValue::Int(1)));
        let second = PipelineStage::Match(MatchFilter::new().eq("b", FilterValue::Int(2)));
        let ordered = order_stages(vec![second.clone(), first.clone()]);
        assert_eq!(ordered, vec![second, first]);
    }
}

//! SQL executor for the typed list-query pipeline
//!
//! Translates an ordered stage list into two queries: a `COUNT(*)` over
//! the filtered and joined rows, then a windowed `SELECT` for the
//! requested page. Every table, column, and alias that reaches the SQL
//! text is checked against a conservative identifier grammar first;
//! filter values only ever travel through bind parameters.
//!
//! The base table is always aliased `t`. Unqualified field names in
//! match, sort, and lookup keys refer to `t`; qualified names
//! (`alias.column`) refer to a lookup alias.

use std::collections::HashSet;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use vidstream_core::error::DomainError;
use vidstream_core::query::{
    order_stages, ContainsFilter, FilterValue, MatchFilter, PageRequest, PageResult,
    PipelineStage, SortDirection,
};
use vidstream_core::traits::RepoResult;

/// Normalized execution plan extracted from an ordered stage list
#[derive(Debug)]
struct Plan {
    table: String,
    filters: Vec<MatchFilter>,
    lookups: Vec<Lookup>,
    unwound: HashSet<String>,
    projection: Vec<String>,
    sort_key: String,
    sort_direction: SortDirection,
    page: PageRequest,
}

#[derive(Debug)]
struct Lookup {
    from: String,
    local_key: String,
    foreign_key: String,
    alias: String,
}

/// Execute a stage list against `table` and fetch one page of `M` rows
///
/// An empty match is a success: the count query short-circuits and the
/// row query never runs.
#[instrument(skip(pool, stages))]
pub async fn run_listing<M>(
    pool: &PgPool,
    table: &str,
    stages: Vec<PipelineStage>,
) -> RepoResult<PageResult<M>>
where
    M: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let plan = build_plan(table, stages)?;

    let total: i64 = build_count_query(&plan)
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .map_err(|e| DomainError::QueryExecutionError(e.to_string()))?;

    if total == 0 {
        return Ok(PageResult::empty(plan.page));
    }

    let items: Vec<M> = build_rows_query(&plan)
        .build_query_as()
        .fetch_all(pool)
        .await
        .map_err(|e| DomainError::QueryExecutionError(e.to_string()))?;

    Ok(PageResult::new(
        items,
        u64::try_from(total).unwrap_or_default(),
        plan.page,
    ))
}

fn build_plan(table: &str, stages: Vec<PipelineStage>) -> Result<Plan, DomainError> {
    check_ident(table)?;

    let mut plan = Plan {
        table: table.to_string(),
        filters: Vec::new(),
        lookups: Vec::new(),
        unwound: HashSet::new(),
        projection: Vec::new(),
        sort_key: String::new(),
        sort_direction: SortDirection::Desc,
        page: PageRequest::default(),
    };

    for stage in order_stages(stages) {
        match stage {
            PipelineStage::Match(mut filter) => {
                for (field, _) in &filter.equals {
                    check_column_ref(field)?;
                }
                if let Some(contains) = &filter.contains {
                    for field in &contains.fields {
                        check_column_ref(field)?;
                    }
                }
                // A contains condition over zero fields matches nothing
                // meaningful; drop it rather than emit `()`.
                if filter.contains.as_ref().is_some_and(|c| c.fields.is_empty()) {
                    filter.contains = None;
                }
                if !filter.is_empty() {
                    plan.filters.push(filter);
                }
            }
            PipelineStage::Lookup {
                from,
                local_key,
                foreign_key,
                alias,
            } => {
                check_ident(&from)?;
                check_column_ref(&local_key)?;
                check_ident(&foreign_key)?;
                check_ident(&alias)?;
                plan.lookups.push(Lookup {
                    from,
                    local_key,
                    foreign_key,
                    alias,
                });
            }
            PipelineStage::Unwind { alias } => {
                check_ident(&alias)?;
                plan.unwound.insert(alias);
            }
            PipelineStage::Project(columns) => {
                for column in &columns {
                    check_projection_entry(column)?;
                }
                plan.projection = columns;
            }
            PipelineStage::Sort { key, direction } => {
                check_column_ref(&key)?;
                plan.sort_key = qualify(&key);
                plan.sort_direction = direction;
            }
            PipelineStage::Paginate(page) => plan.page = page,
        }
    }

    if plan.sort_key.is_empty() {
        plan.sort_key = "t.created_at".to_string();
    }

    Ok(plan)
}

fn build_count_query(plan: &Plan) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM ");
    builder.push(&plan.table);
    builder.push(" AS t");
    push_joins(&mut builder, plan);
    push_where(&mut builder, plan);
    builder
}

fn build_rows_query(plan: &Plan) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    if plan.projection.is_empty() {
        builder.push("t.*");
    } else {
        for (i, column) in plan.projection.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(column);
        }
    }
    builder.push(" FROM ");
    builder.push(&plan.table);
    builder.push(" AS t");
    push_joins(&mut builder, plan);
    push_where(&mut builder, plan);
    builder.push(" ORDER BY ");
    builder.push(&plan.sort_key);
    builder.push(match plan.sort_direction {
        SortDirection::Asc => " ASC",
        SortDirection::Desc => " DESC",
    });
    builder.push(" LIMIT ");
    builder.push_bind(plan.page.limit());
    builder.push(" OFFSET ");
    builder.push_bind(plan.page.offset());
    builder
}

fn push_joins(builder: &mut QueryBuilder<'static, Postgres>, plan: &Plan) {
    for lookup in &plan.lookups {
        // An unwind over the alias turns the left join into an inner
        // join, dropping rows without a join partner.
        if plan.unwound.contains(&lookup.alias) {
            builder.push(" JOIN ");
        } else {
            builder.push(" LEFT JOIN ");
        }
        builder.push(&lookup.from);
        builder.push(" AS ");
        builder.push(&lookup.alias);
        builder.push(" ON ");
        builder.push(&lookup.alias);
        builder.push(".");
        builder.push(&lookup.foreign_key);
        builder.push(" = ");
        builder.push(qualify(&lookup.local_key));
    }
}

fn push_where(builder: &mut QueryBuilder<'static, Postgres>, plan: &Plan) {
    let mut prefix = " WHERE ";
    for filter in &plan.filters {
        for (field, value) in &filter.equals {
            builder.push(prefix);
            prefix = " AND ";
            builder.push(qualify(field));
            builder.push(" = ");
            match value {
                FilterValue::Id(id) => {
                    builder.push_bind(id.into_inner());
                }
                FilterValue::Text(text) => {
                    builder.push_bind(text.clone());
                }
                FilterValue::Flag(flag) => {
                    builder.push_bind(*flag);
                }
                FilterValue::Int(n) => {
                    builder.push_bind(*n);
                }
            }
        }
        if let Some(contains) = &filter.contains {
            builder.push(prefix);
            prefix = " AND ";
            push_contains(builder, contains);
        }
    }
}

fn push_contains(builder: &mut QueryBuilder<'static, Postgres>, contains: &ContainsFilter) {
    let pattern = format!("%{}%", escape_like(&contains.needle));
    builder.push("(");
    for (i, field) in contains.fields.iter().enumerate() {
        if i > 0 {
            builder.push(" OR ");
        }
        builder.push(qualify(field));
        builder.push(" ILIKE ");
        builder.push_bind(pattern.clone());
    }
    builder.push(")");
}

/// Qualify an unadorned column name against the base table alias
fn qualify(field: &str) -> String {
    if field.contains('.') {
        field.to_string()
    } else {
        format!("t.{field}")
    }
}

/// Escape LIKE wildcards so the needle matches literally
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Accept lowercase snake_case identifiers only
fn check_ident(s: &str) -> Result<(), DomainError> {
    let mut chars = s.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(DomainError::QueryExecutionError(format!(
            "unsafe identifier in query plan: {s}"
        )))
    }
}

/// Accept `column` or `alias.column`
fn check_column_ref(s: &str) -> Result<(), DomainError> {
    match s.split_once('.') {
        Some((qualifier, column)) => {
            check_ident(qualifier)?;
            check_ident(column)
        }
        None => check_ident(s),
    }
}

/// Accept a column ref with an optional `AS name` rename
fn check_projection_entry(s: &str) -> Result<(), DomainError> {
    match s.split_once(" AS ") {
        Some((expr, name)) => {
            check_column_ref(expr.trim())?;
            check_ident(name.trim())
        }
        None => check_column_ref(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidstream_core::value_objects::Snowflake;

    fn sort(key: &str, direction: SortDirection) -> PipelineStage {
        PipelineStage::Sort {
            key: key.to_string(),
            direction,
        }
    }

    #[test]
    fn test_bare_plan_defaults_to_created_at_desc() {
        let plan = build_plan("videos", vec![]).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert_eq!(
            sql,
            "SELECT t.* FROM videos AS t ORDER BY t.created_at DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_count_query_omits_sort_and_window() {
        let plan = build_plan("videos", vec![sort("views", SortDirection::Asc)]).unwrap();
        let sql = build_count_query(&plan).into_sql();
        assert_eq!(sql, "SELECT COUNT(*) FROM videos AS t");
    }

    #[test]
    fn test_match_equals_and_contains() {
        let filter = MatchFilter::new()
            .eq("owner_id", FilterValue::Id(Snowflake::new(7)))
            .eq("is_published", FilterValue::Flag(true))
            .contains(
                vec!["title".to_string(), "description".to_string()],
                "rust",
            );
        let plan = build_plan("videos", vec![PipelineStage::Match(filter)]).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert!(sql.contains(
            "WHERE t.owner_id = $1 AND t.is_published = $2 \
             AND (t.title ILIKE $3 OR t.description ILIKE $4)"
        ));
    }

    #[test]
    fn test_lookup_is_left_join_without_unwind() {
        let stages = vec![PipelineStage::Lookup {
            from: "users".to_string(),
            local_key: "owner_id".to_string(),
            foreign_key: "id".to_string(),
            alias: "owner".to_string(),
        }];
        let plan = build_plan("videos", stages).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert!(sql.contains("LEFT JOIN users AS owner ON owner.id = t.owner_id"));
    }

    #[test]
    fn test_unwind_turns_lookup_into_inner_join() {
        let stages = vec![
            PipelineStage::Unwind {
                alias: "owner".to_string(),
            },
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "owner_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "owner".to_string(),
            },
        ];
        let plan = build_plan("videos", stages).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert!(sql.contains(" JOIN users AS owner ON owner.id = t.owner_id"));
        assert!(!sql.contains("LEFT JOIN"));
    }

    #[test]
    fn test_chained_lookup_through_alias() {
        let stages = vec![
            PipelineStage::Lookup {
                from: "videos".to_string(),
                local_key: "video_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "v".to_string(),
            },
            PipelineStage::Lookup {
                from: "users".to_string(),
                local_key: "v.owner_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "owner".to_string(),
            },
        ];
        let plan = build_plan("watch_history", stages).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert!(sql.contains("LEFT JOIN videos AS v ON v.id = t.video_id"));
        assert!(sql.contains("LEFT JOIN users AS owner ON owner.id = v.owner_id"));
    }

    #[test]
    fn test_projection_with_renames() {
        let stages = vec![PipelineStage::Project(vec![
            "v.id AS id".to_string(),
            "v.title AS title".to_string(),
        ])];
        let plan = build_plan("playlist_videos", stages).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert!(sql.starts_with("SELECT v.id AS id, v.title AS title FROM playlist_videos AS t"));
    }

    #[test]
    fn test_stages_run_in_fixed_order_regardless_of_input_order() {
        let stages = vec![
            PipelineStage::Paginate(PageRequest::first()),
            sort("views", SortDirection::Asc),
            PipelineStage::Match(MatchFilter::new().eq("owner_id", FilterValue::Int(1))),
        ];
        let plan = build_plan("videos", stages).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        let where_at = sql.find("WHERE").unwrap();
        let order_at = sql.find("ORDER BY t.views ASC").unwrap();
        let limit_at = sql.find("LIMIT").unwrap();
        assert!(where_at < order_at && order_at < limit_at);
    }

    #[test]
    fn test_unsafe_table_rejected() {
        let err = build_plan("videos; DROP TABLE users", vec![]).unwrap_err();
        assert!(matches!(err, DomainError::QueryExecutionError(_)));
    }

    #[test]
    fn test_unsafe_sort_key_rejected() {
        let err = build_plan("videos", vec![sort("created_at; --", SortDirection::Desc)])
            .unwrap_err();
        assert!(matches!(err, DomainError::QueryExecutionError(_)));
    }

    #[test]
    fn test_unsafe_match_field_rejected() {
        let filter = MatchFilter::new().eq("owner_id = 1 OR 1", FilterValue::Int(1));
        let err = build_plan("videos", vec![PipelineStage::Match(filter)]).unwrap_err();
        assert!(matches!(err, DomainError::QueryExecutionError(_)));
    }

    #[test]
    fn test_like_wildcards_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_empty_contains_fields_dropped() {
        let filter = MatchFilter::new().contains(vec![], "needle");
        let plan = build_plan("videos", vec![PipelineStage::Match(filter)]).unwrap();
        let sql = build_rows_query(&plan).into_sql();
        assert!(!sql.contains("WHERE"));
    }
}

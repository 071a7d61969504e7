//! Example demonstrating polysql's builder, dialects and global filters.
//!
//! Run with:
//!   cargo run --example sql_builder -p polysql

use polysql::entity::{EntityDef, MetadataRegistry};
use polysql::{
    Condition, DialectKind, Pager, SqlBuilder, SqlBuilderFactory, SqlOptions, SqlResult,
};
use std::sync::Arc;

const USER: EntityDef = EntityDef::new("User", "users")
    .with_columns(&[
        ("Id", "id"),
        ("Name", "name"),
        ("Status", "status"),
        ("Role", "role"),
        ("CreatedAt", "created_at"),
    ])
    .with_soft_delete("is_deleted");

const ORDER: EntityDef = EntityDef::new("Order", "orders")
    .with_columns(&[("Id", "id"), ("UserId", "user_id"), ("Total", "total")]);

#[derive(Debug)]
struct Filters {
    status: Option<String>,
    search: Option<String>,
    roles_any_of: Vec<String>,
    page: i64,
    per_page: i64,
    sort_by: Option<String>,
}

fn build_list_users(builder: &mut SqlBuilder, filters: &Filters) -> SqlResult<String> {
    builder.select_columns("User").from("User");

    if let Some(status) = &filters.status {
        builder.equal("User.Status", status.as_str());
    }
    if let Some(search) = &filters.search {
        builder.contains("User.Name", search.as_str());
    }
    if !filters.roles_any_of.is_empty() {
        builder.in_list("User.Role", filters.roles_any_of.iter().map(String::as_str));
    }

    let order = match &filters.sort_by {
        Some(sort_by) => format!("{sort_by}, CreatedAt desc"),
        None => "CreatedAt desc".to_string(),
    };
    builder.page(Some(
        &Pager::new(filters.page, filters.per_page).with_order(order),
    ));

    builder.to_sql()
}

fn main() -> SqlResult<()> {
    let metadata = MetadataRegistry::new().with(USER).with(ORDER);
    let factory = SqlBuilderFactory::new(
        SqlOptions::new().dialect(DialectKind::PgSql).soft_delete(),
        Arc::new(metadata),
    );

    let filters = Filters {
        status: Some("active".to_string()),
        search: Some("a".to_string()),
        roles_any_of: vec!["admin".to_string(), "owner".to_string()],
        page: 2,
        per_page: 10,
        sort_by: Some("Id".to_string()),
    };

    let mut builder = factory.create();
    let sql = build_list_users(&mut builder, &filters)?;
    println!("built sql:\n{sql}\n");
    println!("params = {:?}", builder.params());
    println!("\ndebug sql:\n{}\n", builder.to_debug_sql()?);

    // The same query on every dialect.
    for kind in [
        DialectKind::SqlServer,
        DialectKind::MySql,
        DialectKind::Sqlite,
        DialectKind::Oracle,
    ] {
        let mut builder = SqlBuilderFactory::new(
            SqlOptions::new().dialect(kind),
            Arc::new(MetadataRegistry::new().with(USER)),
        )
        .create();
        println!("-- {kind}\n{}\n", build_list_users(&mut builder, &filters)?);
    }

    // Joins, grouping and an OR group: (status=active) AND (role=admin OR role=owner)
    let mut report = factory.create();
    report
        .select("u.Name, COUNT(o.Id) AS OrderCount")
        .from_as("User", Some("u"))
        .left_join_as("Order", "o")
        .on("u.Id", "o.UserId")
        .equal("u.Status", "active");
    let admin = report.bind("admin");
    let owner = report.bind("owner");
    let role = report.column_of("User", "Role");
    report
        .where_condition(Condition::equal(role.clone(), admin).or(Condition::equal(role, owner)))
        .group_by("u.Name")
        .having("COUNT(o.Id) > 1");
    println!("report sql:\n{}", report.to_sql()?);

    // Forking a base query.
    let mut base = factory.create();
    base.select("Id").from("User").equal("Status", "active");
    let mut recent = base.clone();
    recent.greater("CreatedAt", "2024-01-01").order_by("CreatedAt desc").take(5);
    println!("\nbase sql:\n{}", base.to_sql()?);
    println!("\nrecent sql:\n{}", recent.to_sql()?);

    Ok(())
}

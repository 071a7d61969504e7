use polysql::entity::{EntityDef, MetadataRegistry};
use polysql::filter::SqlContext;
use polysql::{Condition, DialectKind, SqlBuilderFactory, SqlOptions};
use std::sync::Arc;

const USER: EntityDef = EntityDef::new("User", "users").with_soft_delete("is_deleted");
const ORDER: EntityDef = EntityDef::new("Order", "orders").with_columns(&[
    ("Id", "Id"),
    ("UserId", "UserId"),
    ("IsDeleted", "IsDeleted"),
]);
const ROLE: EntityDef = EntityDef::new("Role", "roles");

const OPTIONS: &str = r#"
dialect = "sqlserver"
soft_delete = true
soft_delete_column = "IsDeleted"
log_max_sql_length = 80
"#;

fn tenant_filter(ctx: &mut SqlContext<'_>) {
    let Some(alias) = ctx.aliases.get("Order") else {
        return;
    };
    let column = ctx.dialect.quote_identifier(&format!("{alias}.TenantId"));
    ctx.where_clause.and(Condition::equal(column, "7"));
}

fn factory() -> SqlBuilderFactory {
    let options = SqlOptions::from_toml_str(OPTIONS).unwrap();
    let metadata = MetadataRegistry::new().with(USER).with(ORDER).with(ROLE);
    SqlBuilderFactory::new(options, Arc::new(metadata)).with_filter(tenant_filter)
}

#[test]
fn filters_cover_every_registered_entity() {
    let mut b = factory().create();
    b.select("u.Name, o.Id")
        .from_as("User", Some("u"))
        .left_join_as("Order", "o")
        .on("u.Id", "o.UserId")
        .join_as("Role", "r")
        .on("u.RoleId", "r.Id")
        .equal("u.Name", "x");

    assert_eq!(
        b.to_sql().unwrap(),
        "SELECT [u].[Name], [o].[Id]\n\
         FROM [users] AS [u]\n\
         LEFT JOIN [orders] AS [o] ON [u].[Id]=[o].[UserId]\n\
         JOIN [roles] AS [r] ON [u].[RoleId]=[r].[Id]\n\
         WHERE [u].[Name]=@_p_0 AND [u].[is_deleted]=0 AND [o].[IsDeleted]=0 AND [o].[TenantId]=7"
    );
    assert_eq!(b.params().len(), 1);
}

#[test]
fn soft_delete_covers_self_join() {
    let mut b = factory().create();
    b.select("*")
        .from("User")
        .left_join("User")
        .on("users.ManagerId", "t1.Id");

    assert_eq!(
        b.to_sql().unwrap(),
        "SELECT *\n\
         FROM [users]\n\
         LEFT JOIN [users] AS [t1] ON [users].[ManagerId]=[t1].[Id]\n\
         WHERE [users].[is_deleted]=0 AND [t1].[is_deleted]=0"
    );
}

#[test]
fn filters_run_once_per_builder() {
    let mut b = factory().create();
    b.select("*").from("Order");
    let first = b.to_sql().unwrap();
    assert_eq!(b.to_sql().unwrap(), first);
    assert_eq!(b.get_where(), "WHERE [orders].[IsDeleted]=0 AND [orders].[TenantId]=7");

    let mut copy = b.clone();
    assert_eq!(copy.to_sql().unwrap(), first);
}

#[test]
fn filters_see_only_entities_of_their_builder() {
    let factory = factory();
    let mut users = factory.create();
    users.select("*").from("User");
    let mut roles = factory.create();
    roles.select("*").from("Role");

    assert_eq!(users.get_condition(), "[users].[is_deleted]=0");
    assert_eq!(roles.get_condition(), "");
}

#[test]
fn soft_delete_literal_follows_dialect() {
    let metadata = MetadataRegistry::new().with(USER);
    let factory = SqlBuilderFactory::new(
        SqlOptions::new().dialect(DialectKind::PgSql).soft_delete(),
        Arc::new(metadata),
    );
    let mut b = factory.create();
    b.select("Id").from_as("User", Some("u"));
    assert_eq!(
        b.to_sql().unwrap(),
        "SELECT \"Id\"\nFROM \"users\" AS \"u\"\nWHERE \"u\".\"is_deleted\"=false"
    );
}

#[test]
fn factory_keeps_options() {
    let factory = factory();
    assert_eq!(factory.options().dialect, DialectKind::SqlServer);
    assert_eq!(factory.options().log_max_sql_length, Some(80));
    assert_eq!(factory.filters().len(), 2);
    assert_eq!(factory.dialect().name(), "sqlserver");
}

use polysql::{DialectKind, Pager, ParameterManager, SqlBuilder, Value};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum ParamOp {
    Named(usize),
    Generated,
}

fn param_op_strategy() -> impl Strategy<Value = ParamOp> {
    prop_oneof![
        (0usize..64).prop_map(ParamOp::Named),
        Just(ParamOp::Generated),
    ]
}

proptest! {
    /// Property: generated names never collide with each other or with bound names
    #[test]
    fn generated_names_are_unique(ops in prop::collection::vec(param_op_strategy(), 1..1000)) {
        let mut params = ParameterManager::new("@");
        let mut generated = HashSet::new();
        for op in ops {
            match op {
                ParamOp::Named(n) => {
                    params.add(&format!("_p_{n}"), n as i64).unwrap();
                }
                ParamOp::Generated => {
                    let before = params.len();
                    let name = params.bind(Value::Null);
                    prop_assert_eq!(params.len(), before + 1, "{} was already bound", name);
                    prop_assert!(generated.insert(name));
                }
            }
        }
    }

    /// Property: repeated skip/take calls keep one parameter each, bound to the last count
    #[test]
    fn skip_and_take_reuse_their_parameters(
        skips in prop::collection::vec(0i64..10_000, 1..20),
        takes in prop::collection::vec(1i64..500, 1..20),
    ) {
        let mut b = SqlBuilder::for_dialect(DialectKind::SqlServer);
        for &count in &skips {
            b.skip(count);
        }
        for &count in &takes {
            b.take(count);
        }
        prop_assert_eq!(b.params().len(), 2);
        let offset = b.offset_param().unwrap().to_string();
        let limit = b.limit_param().unwrap().to_string();
        prop_assert_eq!(b.param(&offset).cloned(), Some(Value::from(*skips.last().unwrap())));
        prop_assert_eq!(b.param(&limit).cloned(), Some(Value::from(*takes.last().unwrap())));
        prop_assert_eq!(b.pager().unwrap().page_size, *takes.last().unwrap());
    }

    /// Property: a clone renders the same SQL and parameters as its source
    #[test]
    fn clone_renders_like_source(
        names in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,12}", 1..8),
        value in any::<i64>(),
        page in 1i64..100,
    ) {
        let mut b = SqlBuilder::for_dialect(DialectKind::PgSql);
        b.select(&names.join(", ")).from("T");
        for name in &names {
            b.greater_equal(name, value);
        }
        b.order_by(&names[0]).page(Some(&Pager::new(page, 25)));

        let mut copy = b.clone();
        prop_assert_eq!(copy.to_sql().unwrap(), b.to_sql().unwrap());
        prop_assert_eq!(copy.params(), b.params());
    }

    /// Property: pager arithmetic stays consistent over the whole i64 range
    #[test]
    fn pager_bounds(page in any::<i64>(), size in 1i64.., total in 0i64..) {
        let pager = Pager::new(page, size).with_total_count(total);
        let exact_skip = ((page as i128) - 1) * (size as i128);
        let expected_skip = exact_skip.clamp(0, i64::MAX as i128);
        prop_assert_eq!(pager.skip_count() as i128, expected_skip);
        prop_assert_eq!(pager.start_number() as i128, (expected_skip + 1).min(i64::MAX as i128));
        prop_assert!(pager.start_number() <= pager.end_number());

        let (pages, size, total) = (pager.page_count() as i128, size as i128, total as i128);
        prop_assert!(pages * size >= total);
        prop_assert!((pages - 1).max(0) * size < total.max(1));
    }
}

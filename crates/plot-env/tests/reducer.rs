// File: crates/plot-env/tests/reducer.rs
// Purpose: Validate plot environment transitions: layer registration, removal, tables and fill scales.

use std::sync::Arc;

use plot_env::{
    reducer, AestheticMapping, Category, Column, Extent, LayerKey, PlotAction, PlotEnv, PlotStore, Table,
};

fn points(xs: &[f64], ys: &[f64]) -> Table {
    Table::new()
        .with_column("a", Column::numeric(xs.iter().copied()))
        .and_then(|t| t.with_column("b", Column::numeric(ys.iter().copied())))
        .expect("equal lengths")
}

fn xy() -> AestheticMapping {
    AestheticMapping::new().with("x", "a").with("y", "b")
}

#[test]
fn zero_layers_has_no_domain() {
    let env = PlotEnv::new(Table::new(), 400.0, 300.0, AestheticMapping::new());
    assert_eq!(env.x_domain, None);
    assert_eq!(env.y_domain, None);
    assert!(env.x_ticks.is_empty() && env.y_ticks.is_empty());
    assert!(env.scales.x.is_none() && env.scales.y.is_none());
    assert!(env.default_geometry().is_empty());
}

#[test]
fn register_extends_domains() {
    let env = PlotEnv::new(Table::new(), 400.0, 300.0, AestheticMapping::new());
    let action = PlotAction::register_layer("l1", points(&[0.0, 10.0], &[5.0, 7.0]), xy()).unwrap();
    let next = reducer(&env, action);

    assert_eq!(next.x_domain, Some(Extent::new(0.0, 10.0)));
    assert_eq!(next.y_domain, Some(Extent::new(5.0, 7.0)));
    assert!(!next.x_ticks.is_empty());
    // the previous snapshot is untouched
    assert!(env.layers.is_empty());
    assert_eq!(env.x_domain, None);
}

#[test]
fn default_layer_contributes_to_domain() {
    let env = PlotEnv::new(points(&[-3.0, 4.0], &[1.0, 2.0]), 400.0, 300.0, xy());
    assert_eq!(env.x_domain, Some(Extent::new(-3.0, 4.0)));

    let next = env.reduce(PlotAction::register_layer("l1", points(&[10.0], &[0.0]), xy()).unwrap());
    assert_eq!(next.x_domain, Some(Extent::new(-3.0, 10.0)));
    assert_eq!(next.y_domain, Some(Extent::new(0.0, 2.0)));
}

#[test]
fn register_rejects_missing_column() {
    let err = PlotAction::register_layer("l1", points(&[1.0], &[1.0]), xy().with("fill", "nope")).unwrap_err();
    assert!(err.is_missing_aesthetic(), "{err}");
}

#[test]
fn duplicate_key_replaces_layer() {
    let env = PlotEnv::default();
    let first = PlotAction::register_layer("dup", points(&[0.0, 1.0], &[0.0, 1.0]), xy()).unwrap();
    let second = PlotAction::register_layer("dup", points(&[5.0, 6.0], &[5.0, 6.0]), xy()).unwrap();
    let next = env.reduce(first).reduce(second);

    assert_eq!(next.layers.len(), 1);
    assert_eq!(next.x_domain, Some(Extent::new(5.0, 6.0)));
}

#[test]
fn register_is_idempotent() {
    let env = PlotEnv::new(Table::new(), 300.0, 200.0, AestheticMapping::new());
    let action = PlotAction::register_layer("k", points(&[1.0, 2.0], &[3.0, 4.0]), xy()).unwrap();
    let once = env.reduce(action.clone());
    let twice = once.reduce(action);
    assert_eq!(once, twice);
}

#[test]
fn registration_order_does_not_matter() {
    let env = PlotEnv::new(Table::new(), 300.0, 200.0, AestheticMapping::new());
    let a = PlotAction::register_layer("a", points(&[0.0, 2.0], &[0.0, 1.0]), xy()).unwrap();
    let b = PlotAction::register_layer("b", points(&[-1.0, 1.0], &[4.0, 9.0]), xy()).unwrap();

    let ab = env.reduce(a.clone()).reduce(b.clone());
    let ba = env.reduce(b).reduce(a);
    assert_eq!(ab, ba);
    assert_eq!(ab.x_domain, Some(Extent::new(-1.0, 2.0)));
}

#[test]
fn unregister_restores_prior_domain() {
    let env = PlotEnv::new(Table::new(), 400.0, 300.0, AestheticMapping::new());
    let with_a = env.reduce(PlotAction::register_layer("a", points(&[0.0, 1.0], &[0.0, 1.0]), xy()).unwrap());
    let with_b = with_a.reduce(PlotAction::register_layer("b", points(&[50.0], &[50.0]), xy()).unwrap());
    assert_eq!(with_b.x_domain, Some(Extent::new(0.0, 50.0)));

    let back = with_b.reduce(PlotAction::unregister_layer("b"));
    assert_eq!(back, with_a);
}

#[test]
fn unregister_of_earlier_layer_equals_registering_only_the_later() {
    let env = PlotEnv::new(points(&[2.0, 3.0], &[2.0, 3.0]), 400.0, 300.0, xy());
    let a = PlotAction::register_layer("a", points(&[-40.0], &[90.0]), xy()).unwrap();
    let b = PlotAction::register_layer("b", points(&[10.0, 20.0], &[0.0, 5.0]), xy()).unwrap();

    let via_a = env.reduce(a).reduce(b.clone()).reduce(PlotAction::unregister_layer("a"));
    let only_b = env.reduce(b);
    assert_eq!(via_a, only_b);
    assert_eq!(only_b.x_domain, Some(Extent::new(2.0, 20.0)));
}

#[test]
fn unregister_unknown_key_is_noop() {
    let env = PlotEnv::new(points(&[1.0, 2.0], &[1.0, 2.0]), 400.0, 300.0, xy());
    let next = env.reduce(PlotAction::unregister_layer("missing"));
    assert_eq!(next, env);
}

#[test]
fn set_table_rederives_domain() {
    let env = PlotEnv::new(points(&[0.0, 1.0], &[0.0, 1.0]), 400.0, 300.0, xy());
    let next = env.reduce(PlotAction::set_table(points(&[100.0, 200.0], &[-5.0, 5.0])));
    assert_eq!(next.x_domain, Some(Extent::new(100.0, 200.0)));
    assert_eq!(next.y_domain, Some(Extent::new(-5.0, 5.0)));
    assert_eq!(env.x_domain, Some(Extent::new(0.0, 1.0)));
}

#[test]
fn set_table_reaches_layers_without_own_table() {
    let env = PlotEnv::new(points(&[0.0, 1.0], &[0.0, 1.0]), 400.0, 300.0, AestheticMapping::new());
    let env = env.reduce(PlotAction::register_default_layer("shared", xy()));
    assert_eq!(env.x_domain, Some(Extent::new(0.0, 1.0)));

    let next = env.reduce(PlotAction::set_table(points(&[7.0, 9.0], &[1.0, 1.0])));
    assert_eq!(next.x_domain, Some(Extent::new(7.0, 9.0)));
}

#[test]
fn default_layer_with_unknown_column_is_skipped() {
    let env = PlotEnv::new(points(&[0.0, 1.0], &[0.0, 1.0]), 400.0, 300.0, AestheticMapping::new());
    let env = env.reduce(PlotAction::register_default_layer("bad", AestheticMapping::new().with("x", "zzz")));
    assert_eq!(env.layers.len(), 1);
    assert_eq!(env.x_domain, None);
}

#[test]
fn layer_with_one_missing_column_contributes_nothing() {
    let env = PlotEnv::new(points(&[0.0, 10.0], &[0.0, 1.0]), 400.0, 300.0, AestheticMapping::new());
    let key = LayerKey::new("bad");
    let env = env.reduce(PlotAction::register_default_layer(
        key.clone(),
        AestheticMapping::new().with("x", "a").with("y", "zzz"),
    ));
    assert_eq!(env.x_domain, None);
    assert_eq!(env.y_domain, None);
    assert!(env.x_ticks.is_empty());
    assert!(env.layer_geometry(&key).unwrap().is_empty());

    // a valid layer next to it still drives the domains alone
    let env = env.reduce(PlotAction::register_default_layer("good", xy()));
    assert_eq!(env.x_domain, Some(Extent::new(0.0, 10.0)));
    assert_eq!(env.y_domain, Some(Extent::new(0.0, 1.0)));
    assert!(env.layer_geometry(&key).unwrap().is_empty());
}

#[test]
fn fill_scale_follows_first_occurrence() {
    let table = points(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0])
        .with_column("host", Column::categorical(["beta", "alpha", "beta"]))
        .unwrap();
    let env = PlotEnv::default();
    let key = LayerKey::new("filled");
    let next = env.reduce(PlotAction::register_layer(key.clone(), table, xy().with("fill", "host")).unwrap());

    let scale = next.layer(&key).and_then(|l| l.scales.fill.as_ref()).expect("fill scale");
    let domain: Vec<&Category> = scale.domain().collect();
    assert_eq!(domain, vec![&Category::from("beta"), &Category::from("alpha")]);
    assert_eq!(scale.map(&Category::from("beta")), Some("#31c0f6"));
    assert_eq!(scale.map(&Category::from("alpha")), Some("#ff7e27"));
    assert_eq!(scale.map(&Category::from("gamma")), None);

    let geometry = next.layer_geometry(&key).unwrap();
    assert_eq!(geometry.points.len(), 3);
    assert_eq!(geometry.point_fills[0].as_deref(), Some("#31c0f6"));
}

#[test]
fn layers_without_fill_have_no_fill_scale() {
    let env = PlotEnv::default().reduce(PlotAction::register_layer("p", points(&[1.0], &[1.0]), xy()).unwrap());
    assert!(env.layer(&LayerKey::new("p")).unwrap().scales.fill.is_none());
}

#[test]
fn store_orders_dispatches_and_keeps_old_snapshots() {
    let mut store = PlotStore::new(PlotEnv::new(Table::new(), 200.0, 100.0, AestheticMapping::new()));
    let before = store.snapshot();
    let after = store.dispatch(PlotAction::register_layer("a", points(&[0.0, 4.0], &[0.0, 4.0]), xy()).unwrap());

    assert_eq!(store.revision(), 1);
    assert!(before.layers.is_empty());
    assert_eq!(after.layers.len(), 1);
    assert!(Arc::ptr_eq(&after, &store.snapshot()));

    let last = store.dispatch_all([PlotAction::set_dimensions(800.0, 600.0), PlotAction::unregister_layer("a")]);
    assert_eq!(store.revision(), 3);
    assert!(last.layers.is_empty());
    assert_eq!(last.width, 800.0);
}

#[test]
fn generated_keys_are_distinct() {
    let a = LayerKey::generate();
    let b = LayerKey::generate();
    assert_ne!(a, b);
    assert_eq!(a.as_str().len(), 36);
}

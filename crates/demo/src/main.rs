// File: crates/demo/src/main.rs
// Summary: Demo loads an annotated CSV query result, bins it into a stacked histogram and prints layout at two sizes.

use anyhow::{Context, Result};
use plot_env::{
    histogram_layer, parse_annotated_csv, theme, to_table, AestheticMapping, BinOptions, HistogramSpec, LayerKey,
    LayoutConfig, PlotAction, PlotEnv, PlotStore,
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE: &str = "\
#datatype,string,long,dateTime:RFC3339,double,string
#group,false,false,false,false,true
#default,_result,,,,
,result,table,_time,_value,host
,_result,0,2024-03-01T00:00:00Z,12.5,alpha
,_result,0,2024-03-01T00:01:00Z,14.0,alpha
,_result,0,2024-03-01T00:02:00Z,13.1,alpha
,_result,0,2024-03-01T00:03:00Z,19.8,alpha
,_result,0,2024-03-01T00:04:00Z,22.4,alpha

#datatype,string,long,dateTime:RFC3339,double,string
#group,false,false,false,false,true
#default,_result,,,,
,result,table,_time,_value,host
,_result,1,2024-03-01T00:00:00Z,8.2,beta
,_result,1,2024-03-01T00:01:00Z,9.9,beta
,_result,1,2024-03-01T00:02:00Z,15.3,beta
,_result,1,2024-03-01T00:03:00Z,17.0,beta
";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plot_env=info,plot_env_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional input path and theme name; defaults to the embedded sample
    let mut args = std::env::args().skip(1);
    let text = match args.next() {
        Some(raw) => {
            let path = Path::new(&raw);
            std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))?
        }
        None => SAMPLE.to_string(),
    };
    let theme = args.next().map(|name| theme::find(&name)).unwrap_or_default();
    println!("Theme: {}", theme.name);

    let chunks = parse_annotated_csv(&text).context("parsing annotated CSV")?;
    let ingested = to_table(&chunks).context("building table from query result")?;
    if let Some(warning) = ingested.schema_error_message() {
        println!("Warning: {warning}");
    }
    let table = ingested.table;
    println!(
        "Loaded {} rows: {:?}",
        table.len(),
        table.column_types().map(|(n, t)| format!("{n}:{t}")).collect::<Vec<_>>()
    );
    if table.is_empty() {
        anyhow::bail!("no rows loaded, check the annotation rows.");
    }

    let defaults = AestheticMapping::new().with("x", "_value");
    let env = PlotEnv::with_config(table, 0.0, 0.0, defaults, LayoutConfig::default(), theme);
    let mut store = PlotStore::new(env);

    let key = LayerKey::generate();
    let spec = HistogramSpec::default()
        .fill("host")
        .options(BinOptions::default().bins(5));
    let action = histogram_layer(&store.snapshot(), key.clone(), &spec).context("binning '_value' by host")?;
    println!("Action: {}", serde_json::to_string(&action)?);
    store.dispatch(action);

    for (w, h) in [(400.0, 300.0), (800.0, 600.0)] {
        let env = store.dispatch(PlotAction::set_dimensions(w, h));
        info!(revision = store.revision(), width = w, height = h, "resized");
        println!("--- {}x{} ---", env.width, env.height);
        println!("x domain: {:?}  y domain: {:?}", env.x_domain, env.y_domain);
        println!("x ticks: {:?}", env.x_ticks);
        println!("y ticks: {:?}", env.y_ticks);
        println!(
            "margins: top {} right {} bottom {} left {}  inner {}x{}",
            env.margins.top, env.margins.right, env.margins.bottom, env.margins.left, env.inner_width, env.inner_height
        );

        let geometry = env
            .layer_geometry(&key)
            .with_context(|| format!("layer {key} missing from snapshot"))?;
        for (rect, fill) in geometry.rects.iter().zip(&geometry.rect_fills) {
            println!(
                "  bar [{:.1}, {:.1}] x [{:.1}, {:.1}] fill {}",
                rect.left,
                rect.right,
                rect.top,
                rect.bottom,
                fill.as_deref().unwrap_or("-")
            );
        }
    }

    store.dispatch(PlotAction::unregister_layer(key));
    let env = store.snapshot();
    println!("After unregister: {} layers, x domain {:?}", env.layers.len(), env.x_domain);
    Ok(())
}

#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use plotters::prelude::*;
use primetable::{
    ChainingMap, HashTable, OpenAddressingMap,
    hash::{HashFn, std_hash, sum_of_chars, weighted_sum_of_chars},
};
use rand::Rng;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Keys inserted into every map
const TOTAL_KEYS: usize = 20_000;
// Points sampled along the way
const CHECKPOINTS: usize = 10;
const INITIAL_CAPACITY: usize = 11;

const HASHERS: [(&str, HashFn); 3] =
    [("sum of chars", sum_of_chars), ("weighted sum", weighted_sum_of_chars), ("DefaultHasher", std_hash)];

const COLORS: [RGBColor; 6] = [
    RGBColor(220, 50, 50),  // Bright red
    RGBColor(240, 150, 150), // Light red
    RGBColor(50, 90, 220),  // Bright blue
    RGBColor(150, 170, 240), // Light blue
    RGBColor(50, 180, 50),  // Bright green
    RGBColor(150, 220, 150), // Light green
];

#[derive(Debug, Clone, Copy)]
struct Sample {
    keys: usize,
    load: f64,
    empty_ratio: f64,
    lookup_cost: f64,
}

#[derive(Debug)]
struct Series {
    label: String,
    samples: Vec<Sample>,
}

// Lowercase ASCII keys of 4 to 11 characters
fn random_key(rng: &mut impl Rng) -> String {
    let length = rng.random_range(4..12);
    (0..length).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

// Inserts `keys` one by one, sampling the map at every checkpoint. `cost` measures
// how much work a lookup of one key takes.
fn measure<M, C>(label: String, mut map: M, keys: &[String], cost: C) -> Series
where
    M: HashTable<usize>,
    C: Fn(&M, &str) -> usize,
{
    let step = (keys.len() / CHECKPOINTS).max(1);
    let mut samples = Vec::with_capacity(CHECKPOINTS);

    for (inserted, key) in keys.iter().enumerate() {
        map.put(key.clone(), inserted);

        let count = inserted + 1;
        if count % step != 0 {
            continue;
        }

        let total_cost: usize = keys[..count].iter().map(|key| cost(&map, key)).sum();
        let sample = Sample {
            keys: count,
            load: map.table_load(),
            empty_ratio: map.empty_buckets() as f64 / map.capacity() as f64,
            lookup_cost: total_cost as f64 / count as f64,
        };
        debug!(
            series = %label,
            keys = sample.keys,
            capacity = map.capacity(),
            load = sample.load,
            empty_ratio = sample.empty_ratio,
            lookup_cost = sample.lookup_cost,
            "checkpoint"
        );
        samples.push(sample);
    }

    info!(series = %label, capacity = map.capacity(), len = map.len(), "series complete");
    Series { label, samples }
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[Series],
    metric: fn(&Sample) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|line| line.samples.iter().map(metric))
        .fold(0.0, |max, y| if y > max { y } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..TOTAL_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (index, line) in series.iter().enumerate() {
        let color = &COLORS[index % COLORS.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                line.samples.iter().map(|sample| (sample.keys, metric(sample))),
                line_style,
            ))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            line.samples
                .iter()
                .map(|sample| Circle::new((sample.keys, metric(sample)), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("load_report=info,primetable=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..TOTAL_KEYS).map(|_| random_key(&mut rng)).collect();
    info!(keys = keys.len(), "generated random keys");

    let mut series = Vec::with_capacity(HASHERS.len() * 2);
    for (name, hash_fn) in HASHERS {
        series.push(measure(
            format!("open addressing, {name}"),
            OpenAddressingMap::new(INITIAL_CAPACITY, hash_fn),
            &keys,
            |map: &OpenAddressingMap<usize>, key: &str| map.probe_length(key),
        ));
        series.push(measure(
            format!("chaining, {name}"),
            ChainingMap::new(INITIAL_CAPACITY, hash_fn),
            &keys,
            |map: &ChainingMap<usize>, key: &str| map.chain_length(key),
        ));
    }

    for line in &series {
        if let Some(last) = line.samples.last() {
            info!(
                series = %line.label,
                load = last.load,
                empty_ratio = last.empty_ratio,
                lookup_cost = last.lookup_cost,
                "final sample"
            );
        }
    }

    plot(
        "lookup_cost.png",
        "Average Lookup Cost",
        "Slots probed / chain nodes per lookup",
        &series,
        |sample| sample.lookup_cost,
    )?;
    plot("table_load.png", "Table Load", "Live keys per bucket", &series, |sample| sample.load)?;
    plot(
        "empty_buckets.png",
        "Empty Buckets",
        "Share of buckets without a live key",
        &series,
        |sample| sample.empty_ratio,
    )?;

    info!("generated lookup_cost.png, table_load.png, empty_buckets.png");
    Ok(())
}

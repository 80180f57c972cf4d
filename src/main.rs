use anyhow::{bail, Context};
use campus_nav::graph::{MapNode, NodeLocator};
use campus_nav::route::{find_route, to_geojson_feature, to_wkt, RouteOutcome};
use campus_nav::store::{self, JsonFileStore, MapStore};
use campus_nav::utils;
use campus_nav::import::MAX_SNAP_DECIMALS;
use campus_nav::{Coordinate, ImportConfig};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "campus-nav")]
#[command(version = "0.1")]
#[command(about = "campus map import and route search", long_about = None)]
struct Args {
    /// map data file
    #[arg(short, long, value_name = "STORE_FILE", default_value = "map.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// build the map from a geojson export
    Import {
        #[arg(value_name = "GEOJSON_FILE")]
        input_file: PathBuf,
        /// replace existing map data
        #[arg(long)]
        reset: bool,
        /// keep ways in drawing direction only
        #[arg(long)]
        one_way: bool,
        /// round coordinates before merging nodes
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_SNAP_DECIMALS as i64))]
        snap_decimals: Option<u32>,
    },
    /// delete all map data
    Reset,
    /// shortest route between two named places
    Route {
        origin: String,
        destination: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// create a node or move it
    Node {
        id: String,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// list points of interest
    Pois,
    /// nearest node to a position
    Nearest {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// search radius in meters
        #[arg(long, default_value_t = 30.0)]
        radius: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Geojson,
    Wkt,
}

fn main() -> anyhow::Result<()> {
    utils::log::log_init();
    let args = Args::parse();
    debug!("{:?}", args);

    let mut store = JsonFileStore::new(args.store.clone());

    match args.command {
        Command::Import {
            input_file,
            reset,
            one_way,
            snap_decimals,
        } => {
            info!("read geojson file {} ", input_file.display());
            let file = File::open(&input_file)
                .with_context(|| format!("open {} failed", input_file.display()))?;
            let geojson = geojson::GeoJson::from_reader(BufReader::new(file))
                .context("read geojson failed")?;
            let config = ImportConfig {
                bidirectional_ways: !one_way,
                snap_decimals,
                ..ImportConfig::default()
            };
            let report = if reset {
                store::reimport_geojson(&mut store, &geojson, &config)?
            } else {
                store::import_geojson(&mut store, &geojson, &config)?
            };
            if !report.diagnostics.is_empty() {
                warn!("{} features skipped, see log above", report.diagnostics.len());
            }
            println!(
                "imported {} nodes, {} connections, {} pois",
                report.nodes, report.connections, report.pois
            );
        }
        Command::Reset => {
            store.clear()?;
            println!("map data cleared");
        }
        Command::Route {
            origin,
            destination,
            format,
        } => {
            let (graph, _) = store::load_graph(&store)?;
            match find_route(&graph, &origin, &destination) {
                RouteOutcome::Found(route) => match format {
                    OutputFormat::Text => {
                        println!("{:.1} m", route.total_distance);
                        println!("{}", route.path.join(" -> "));
                    }
                    OutputFormat::Geojson => {
                        let feature = to_geojson_feature(&route, &graph);
                        println!("{}", geojson::GeoJson::Feature(feature));
                    }
                    OutputFormat::Wkt => println!("{}", to_wkt(&route, &graph)),
                },
                failed => bail!("{}", failed),
            }
        }
        Command::Node { id, lat, lon } => {
            store.upsert_node(MapNode { id: id.clone(), lat, lon })?;
            println!("node {} at {}", id, Coordinate::new(lat, lon));
        }
        Command::Pois => {
            let (graph, _) = store::load_graph(&store)?;
            for poi in graph.pois() {
                println!("{}\t{}\t{}", poi.id, poi.node_id, poi.name);
            }
        }
        Command::Nearest { lat, lon, radius } => {
            let (graph, _) = store::load_graph(&store)?;
            let locator = NodeLocator::new(&graph);
            match locator.nearest(Coordinate::new(lat, lon), radius) {
                Some((id, d)) => println!("{}\t{:.1} m", id, d),
                None => bail!("no node within {} m", radius),
            }
        }
    }
    Ok(())
}

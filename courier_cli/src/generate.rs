use std::path::PathBuf;

use clap::Subcommand;
use courier_dispatch::generator::{
    generator_params::load_generator_params, instance_generator::InstanceGenerator,
};
use courier_network::{loader::read_arc_records, routing::static_network::StaticNetwork};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::info;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// Random instance over the cities of an arc file
    Instance {
        #[arg(short, long, env = "COURIER_ARCS")]
        arcs: PathBuf,

        /// Generator parameters JSON file
        #[arg(short, long)]
        params: PathBuf,

        #[arg(long, default_value_t = 2)]
        vehicles: usize,

        #[arg(long, default_value_t = 3)]
        requests: usize,

        /// Seed for reproducible instances, random when missing
        #[arg(long)]
        seed: Option<u64>,

        /// Output file, printed to stdout when missing
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    JsonSchema {
        /// Output file for the instance JSON schema
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::Instance {
            arcs,
            params,
            vehicles,
            requests,
            seed,
            out,
        } => {
            let records = read_arc_records(&arcs)?;
            let network = StaticNetwork::from_records(&records)?;
            let params = load_generator_params(&params)?;

            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };

            let instance =
                InstanceGenerator::new(&network, &params)?.generate(vehicles, requests, &mut rng)?;
            let json = serde_json::to_string_pretty(&instance)?;

            match out {
                Some(out) => {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&out, json)?;
                    info!("Instance written to {}", out.display());
                }
                None => println!("{json}"),
            }
        }
        GenerateSubcommands::JsonSchema { out } => {
            let schema = courier_dispatch::json::schema::generate_json_schema()?;

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, schema)?;
        }
    }

    Ok(())
}

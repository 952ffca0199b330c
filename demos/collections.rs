//! Example decoding sequences, arrays and maps on their own

use std::collections::BTreeMap;

use nestenv::{Case, Decoder, Namespace};

fn main() -> anyhow::Result<()> {
    // An injected namespace instead of the process environment
    let env = Namespace::from_iter([
        ("SVC_PORTS_0", "80"),
        ("SVC_PORTS_1", "443"),
        ("SVC_UPSTREAMS_0", "10.0.0.1:80"),
        ("SVC_UPSTREAMS_1", "10.0.0.2:80"),
        ("SVC_WEIGHTS_EU_WEST", "0.25"),
        ("SVC_WEIGHTS_US", "0.75"),
        ("SVC_GRID_0_0", "1"),
        ("SVC_GRID_0_1", "2"),
        ("SVC_GRID_1_0", "3"),
    ]);
    let decoder = Decoder::new().prefix("svc").case(Case::Upper);

    let mut ports: Vec<u16> = Vec::new();
    decoder.decode_named_from(&env, "ports", &mut ports)?;

    let mut upstreams = [std::net::SocketAddr::from(([0, 0, 0, 0], 0)); 2];
    decoder.decode_named_from(&env, "upstreams", &mut upstreams)?;

    // Map keys are taken from the variable names as they are
    let mut weights: BTreeMap<String, f64> = BTreeMap::new();
    decoder.decode_named_from(&env, "weights", &mut weights)?;

    let mut grid: Vec<Vec<i32>> = Vec::new();
    decoder.decode_named_from(&env, "grid", &mut grid)?;

    println!("Ports: {ports:?}");
    println!("Upstreams: {upstreams:?}");
    println!("Weights: {weights:?}");
    println!("Grid: {grid:?}");

    Ok(())
}

//! Hedge CLI - half-edge topology inspection tool.
//!
//! Usage: hedge <COMMAND> [OPTIONS] <INPUT>
//!
//! Run `hedge --help` for available commands. Set `RUST_LOG=debug` for
//! builder diagnostics.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use hedge::io;
use hedge::mesh::{BuildOptions, FaceId, HalfEdgeId, HalfEdgeMesh, VertexId};

#[derive(Parser)]
#[command(name = "hedge")]
#[command(author, version, about = "Half-edge topology CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use single-threaded construction
    #[arg(long, global = true)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Display topology statistics
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Print the raw face table and the half-edge records
    Dump {
        /// Input mesh file
        input: PathBuf,

        /// Maximum number of entries printed per table
        #[arg(short, long, default_value = "128")]
        limit: usize,
    },

    /// Walk a face loop and a vertex fan
    Walk {
        /// Input mesh file
        input: PathBuf,

        /// Face whose loop is printed
        #[arg(short, long, default_value = "0")]
        face: usize,

        /// Vertex whose fan is printed (default: first vertex of the face)
        #[arg(short, long)]
        vertex: Option<usize>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = BuildOptions::default().with_parallel(!cli.sequential);

    match cli.command {
        Commands::Info { input } => cmd_info(&input, &options)?,
        Commands::Dump { input, limit } => cmd_dump(&input, &options, limit)?,
        Commands::Walk {
            input,
            face,
            vertex,
        } => cmd_walk(&input, &options, face, vertex)?,
    }

    Ok(())
}

fn load(input: &Path, options: &BuildOptions) -> Result<HalfEdgeMesh, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mesh = io::load_with_options(input, options)?;
    log::info!("Built topology for {} in {:.2?}", input.display(), start.elapsed());
    Ok(mesh)
}

/// Format an optional half-edge link, `-1` for none.
fn link(he: Option<HalfEdgeId>) -> String {
    he.map_or_else(|| "-1".to_string(), |h| h.index().to_string())
}

fn cmd_info(input: &Path, options: &BuildOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(input, options)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Edges: {}", mesh.num_edges());
    println!("Half-edges: {}", mesh.num_halfedges());

    if mesh.is_triangle_mesh() {
        println!("Mesh type: Triangle mesh");
    } else if mesh.is_quad_mesh() {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Mixed polygon mesh");
    }

    let unreferenced = mesh
        .vertex_ids()
        .filter(|&v| mesh.vertex_halfedge(v).is_none())
        .count();
    if unreferenced > 0 {
        println!("Unreferenced vertices: {}", unreferenced);
    }

    if mesh.is_closed() {
        println!("Topology: Closed (no boundary)");
    } else {
        let boundary_verts = mesh
            .vertex_ids()
            .filter(|&v| mesh.is_boundary_vertex(v))
            .count();
        println!(
            "Topology: Open ({} boundary edges, {} boundary vertices)",
            mesh.num_boundary_edges(),
            boundary_verts
        );
    }

    Ok(())
}

fn cmd_dump(
    input: &Path,
    options: &BuildOptions,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let soup = io::load_faces(input)?;
    for (i, v) in soup.indices.iter().take(limit).enumerate() {
        println!("f[{}] = {}", i, v);
    }
    for (i, c) in soup.counts.iter().take(limit).enumerate() {
        println!("fv[{}] = {}", i, c);
    }

    let mesh = load(input, options)?;
    println!("===================");

    for (i, anchor) in mesh.vertex_halfedges_table().iter().take(limit).enumerate() {
        println!("v[{}].halfedge_index = {}", i, link(*anchor));
    }
    for (i, e) in mesh.edges().iter().take(limit).enumerate() {
        println!("edge[{}] = ({}, {})", i, e.v0.index(), e.v1.index());
    }
    for (i, he) in mesh.halfedges().iter().take(limit).enumerate() {
        println!(
            "halfedge[{}]: edge {}, next {}, opposite {}",
            i,
            he.edge.index(),
            he.next.index(),
            link(he.opposite)
        );
    }

    Ok(())
}

fn cmd_walk(
    input: &Path,
    options: &BuildOptions,
    face: usize,
    vertex: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(input, options)?;

    if face >= mesh.num_faces() {
        return Err(format!("face {} out of range (mesh has {} faces)", face, mesh.num_faces()).into());
    }
    let f = FaceId::new(face);

    println!("Face {} ({} vertices):", face, mesh.face_vertex_count(f));
    for he in mesh.face_halfedges(f) {
        print_halfedge(&mesh, he);
    }

    let v = match vertex {
        Some(v) => VertexId::new(v),
        None => mesh.origin(mesh.face(f).halfedge),
    };
    let Some(anchor) = mesh.vertex_halfedge(v) else {
        return Err(format!("vertex {} is not referenced by any face", v.index()).into());
    };

    println!("Fan around vertex {} (anchor {}):", v.index(), anchor.index());
    for he in mesh.vertex_fan(v) {
        print_halfedge(&mesh, he);
    }
    if mesh.is_boundary_vertex(v) {
        println!("boundary");
    }
    let neighbors: Vec<String> = mesh.vertex_neighbors(v).map(|n| n.index().to_string()).collect();
    println!("Neighbors: [{}]", neighbors.join(", "));

    Ok(())
}

fn print_halfedge(mesh: &HalfEdgeMesh, he: HalfEdgeId) {
    let h = mesh.halfedge(he);
    let edge = mesh.edge(h.edge);
    println!("halfedge {}", he.index());
    println!("  edge_index {}", h.edge.index());
    println!("    ({}, {})", edge.v0.index(), edge.v1.index());
    println!("  {} -> {}", mesh.origin(he).index(), mesh.dest(he).index());
    println!("  opposite_index {}", link(h.opposite));
    println!("  next {}", h.next.index());
}

//! Load an OBJ, decimate it to a target face count, write the result.
//!
//! Usage: decimate_obj <input.obj> <target-faces> [output.obj]

use anyhow::{bail, Context};
use terralod_decimate::{Decimator, DecimatorStatus};
use terralod_io::{read_mesh, MeshWriter, ObjWriter};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(input), Some(target)) = (args.next(), args.next()) else {
        bail!("usage: decimate_obj <input.obj> <target-faces> [output.obj]");
    };
    let target: usize = target.parse().context("target face count must be an integer")?;
    let output = args.next();

    let mesh = read_mesh(&input).with_context(|| format!("loading {input}"))?;
    println!(
        "loaded {} vertices and {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );

    let mut decimator = Decimator::new(mesh)?;
    let performed = decimator.decimate_to_face_count(target)?;
    if decimator.status() == DecimatorStatus::Exhausted {
        println!("decimation exhausted after {performed} collapses");
    } else {
        println!("reached target after {performed} collapses");
    }

    let mut mesh = decimator.into_mesh();
    mesh.compact();
    println!(
        "result: {} vertices and {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );

    if let Some(output) = output {
        ObjWriter::write_mesh(&mesh, &output).with_context(|| format!("writing {output}"))?;
        println!("wrote {output}");
    }
    Ok(())
}

//! Text and JSON summaries of decoded files.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use voxfile::{Color, Palette, PaletteSource, Voxel, VoxFile};
use voxfile_config::{OutputConfig, OutputFormat};

/// JSON shape of one decoded file.
#[derive(Serialize)]
struct Report<'a> {
    path: &'a Path,
    version: u32,
    size: [u32; 3],
    voxel_count: usize,
    palette_source: PaletteSource,
    used_indices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    voxels: Option<&'a [Voxel]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    palette: Option<&'a Palette>,
}

/// Renders `file` according to `output`.
pub fn render(path: &Path, file: &VoxFile, output: &OutputConfig) -> serde_json::Result<String> {
    match output.format {
        OutputFormat::Text => Ok(render_text(path, file, output.list_voxels)),
        OutputFormat::Json => {
            let report = Report {
                path,
                version: file.version,
                size: file.dimensions(),
                voxel_count: file.voxel_count(),
                palette_source: file.palette.source(),
                used_indices: used_indices(&file.voxels),
                voxels: output.list_voxels.then_some(file.voxels.as_slice()),
                palette: output.list_voxels.then_some(&file.palette),
            };
            if output.pretty_json {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
        }
    }
}

fn render_text(path: &Path, file: &VoxFile, list_voxels: bool) -> String {
    let [x, y, z] = file.dimensions();
    let palette = match file.palette.source() {
        PaletteSource::Default => "default",
        PaletteSource::Custom => "custom",
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", path.display());
    let _ = writeln!(out, "  version:  {}", file.version);
    let _ = writeln!(out, "  size:     {x} x {y} x {z}");
    let _ = writeln!(out, "  voxels:   {}", file.voxel_count());
    let _ = writeln!(out, "  palette:  {palette} ({} indices used)", used_indices(&file.voxels));

    if list_voxels {
        for voxel in &file.voxels {
            let _ = writeln!(
                out,
                "    {:>3} {:>3} {:>3}  #{:<3} {}",
                voxel.x,
                voxel.y,
                voxel.z,
                voxel.index,
                hex(file.color_of(voxel))
            );
        }
    }
    out
}

fn used_indices(voxels: &[Voxel]) -> usize {
    voxels.iter().map(|v| v.index).collect::<BTreeSet<_>>().len()
}

fn hex(color: Color) -> String {
    format!("{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
}

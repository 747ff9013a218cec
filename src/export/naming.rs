//! Output file naming for zone exports.
//!
//! Downstream consumers match on these suffixes, so they are fixed:
//! `{id}_capa.png` for the front cover, `{id}_quartacapa.png` for the back
//! cover, `{id}_lombada.png` for the spine and `{id}_orelha_esq.png` /
//! `{id}_orelha_dir.png` for the flaps.
use crate::types::StructuralZone;

pub fn zone_suffix(zone: StructuralZone) -> &'static str {
    match zone {
        StructuralZone::FrontCover => "capa",
        StructuralZone::BackCover => "quartacapa",
        StructuralZone::Spine => "lombada",
        StructuralZone::LeftFlap => "orelha_esq",
        StructuralZone::RightFlap => "orelha_dir",
    }
}

pub fn export_file_name(identifier: &str, zone: StructuralZone) -> String {
    format!("{identifier}_{}.png", zone_suffix(zone))
}

//! Simple decoder to inspect wardrobe files.

use std::fs;

use vanita_wardrobe::{Asset, Outfit, Rgb24, Wardrobe, decode_wardrobe, peek_version};

fn format_color(c: Rgb24) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn format_asset(asset: &Asset) -> String {
    match asset {
        Asset::WithoutMetadata { id } => format!("{}", id),
        Asset::WithMetadata(meta) => format!(
            "{} (order {}, puffiness {:.3}, pos [{:.2}, {:.2}, {:.2}])",
            meta.id, meta.order, meta.puffiness, meta.position.x, meta.position.y, meta.position.z
        ),
    }
}

fn print_outfit(wardrobe: &Wardrobe, i: usize, outfit: &Outfit) {
    println!("[{}] \"{}\" ({:?})", i, outfit.name, outfit.avatar_type);
    println!(
        "      created {}  modified {}  last used {}  uses {}",
        outfit.created, outfit.modified, outfit.last_used, outfit.use_count
    );
    let tags: Vec<&str> = wardrobe.tag_labels(outfit).collect();
    if !tags.is_empty() {
        println!("      tags: {}", tags.join(", "));
    }
    let colors: Vec<String> = outfit.colors().into_iter().map(format_color).collect();
    println!("      colors: {}", colors.join(" "));
    println!(
        "      scales: height {:.3} width {:.3} head {:.3} depth {:.3} proportion {:.3} body {:.3}",
        outfit.height, outfit.width, outfit.head, outfit.depth, outfit.proportion, outfit.body_type
    );
    for asset in outfit.assets.iter().take(5) {
        println!("      asset {}", format_asset(asset));
    }
    if outfit.assets.len() > 5 {
        println!("      ... and {} more assets", outfit.assets.len() - 5);
    }
    if !outfit.thumbnail.is_empty() {
        println!("      thumbnail: {} bytes", outfit.thumbnail.len());
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wardrobe.vanita".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    match peek_version(&data) {
        Ok(version) => println!("Format version: {}", version),
        Err(e) => println!("No version prefix: {}", e),
    }

    let wardrobe = match decode_wardrobe(&data) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to decode ({}): {}", e.kind().as_str(), e);
            std::process::exit(1);
        }
    };

    println!("\n=== Tags ({}) ===", wardrobe.tags.len());
    for (i, tag) in wardrobe.tags.iter().enumerate() {
        println!("  {:3}: {}", i, tag);
    }

    println!("\n=== Outfits ({}) ===", wardrobe.outfits.len());
    for (i, outfit) in wardrobe.outfits.iter().enumerate().take(20) {
        print_outfit(&wardrobe, i, outfit);
    }
    if wardrobe.outfits.len() > 20 {
        println!("... and {} more outfits", wardrobe.outfits.len() - 20);
    }
}

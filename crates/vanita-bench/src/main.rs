//! Benchmark for wardrobe serialization using synthetic outfits.
//!
//! Usage: `bench-wardrobe [OUTFITS] [THUMBNAIL_BYTES]`. Set `RUST_LOG=debug`
//! to see the codec's own events.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vanita_wardrobe::{
    AssetWithMetadata, AvatarType, ExportFormat, Outfit, OutfitBuilder, Rgb24, Vec3, Wardrobe,
    decode_wardrobe, encode_wardrobe, export_wardrobe, validate_batch,
};

const DEFAULT_OUTFITS: usize = 10_000;
const DEFAULT_THUMBNAIL_BYTES: usize = 2_048;

const TAGS: [&str; 8] = [
    "Casual", "Formal", "Sport", "Winter", "Summer", "Fantasy", "Sci-fi", "Favorites",
];

fn random_color(rng: &mut StdRng) -> Rgb24 {
    Rgb24::new(rng.random(), rng.random(), rng.random())
}

fn random_vec3(rng: &mut StdRng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-extent..=extent),
        rng.random_range(-extent..=extent),
        rng.random_range(-extent..=extent),
    )
}

fn synthetic_outfit(rng: &mut StdRng, index: usize, thumbnail_bytes: usize) -> Outfit {
    let created = 1_700_000_000_000 + index as u64 * 60_000;
    let mut builder = OutfitBuilder::new(format!("Outfit #{index}"))
        .created(created)
        .modified(created + rng.random_range(0..86_400_000))
        .last_used(if index % 3 == 0 { 0 } else { created + 1 })
        .use_count(rng.random_range(0..1_000))
        .colors(std::array::from_fn(|_| random_color(rng)))
        .scales(
            rng.random_range(0.9..=1.1),
            rng.random_range(0.7..=1.0),
            rng.random_range(0.95..=1.0),
            rng.random_range(0.5..=1.5),
            rng.random_range(0.0..=0.5),
        )
        .body_type(rng.random_range(0.0..=1.0))
        .avatar_type(if index % 5 == 0 { AvatarType::R6 } else { AvatarType::R15 });

    for t in 0..rng.random_range(0..3usize) {
        builder = builder.tag(((index + t) % TAGS.len()) as u8);
    }

    for _ in 0..rng.random_range(4..12usize) {
        builder = builder.asset(rng.random_range(1..20_000_000_000));
    }
    for order in 0..rng.random_range(0..4u8) {
        builder = builder.asset_with_metadata(AssetWithMetadata {
            id: rng.random_range(1..20_000_000_000),
            order,
            puffiness: rng.random_range(0.0..=2.0),
            position: random_vec3(rng, 5.0),
            rotation: random_vec3(rng, 180.0),
            scale: Vec3::ONE,
        });
    }

    let thumbnail: Vec<u8> = (0..thumbnail_bytes).map(|_| rng.random()).collect();
    builder.thumbnail(thumbnail).build()
}

fn throughput(bytes: usize, elapsed: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / elapsed.as_secs_f64()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let outfit_count = args
        .next()
        .map(|s| s.parse().expect("OUTFITS must be a number"))
        .unwrap_or(DEFAULT_OUTFITS);
    let thumbnail_bytes = args
        .next()
        .map(|s| s.parse().expect("THUMBNAIL_BYTES must be a number"))
        .unwrap_or(DEFAULT_THUMBNAIL_BYTES);

    info!(outfits = outfit_count, thumbnail_bytes, "building synthetic wardrobe");

    let tags: Vec<String> = TAGS.iter().map(|t| t.to_string()).collect();
    let mut rng = StdRng::seed_from_u64(0x9e37_79b9_7f4a_7c15);
    let build_start = Instant::now();
    let outfits: Vec<Outfit> = (0..outfit_count)
        .map(|i| synthetic_outfit(&mut rng, i, thumbnail_bytes))
        .collect();
    let build_time = build_start.elapsed();

    let asset_count: usize = outfits.iter().map(|o| o.assets.len()).sum();
    println!(
        "Built {} outfits ({} assets) in {:?}",
        outfits.len(),
        asset_count,
        build_time
    );

    // Benchmark validation
    let validate_start = Instant::now();
    validate_batch(&tags, &outfits).expect("synthetic wardrobe should validate");
    let validate_time = validate_start.elapsed();
    println!("\nValidate: {:?}", validate_time);

    // Benchmark encoding
    let encode_start = Instant::now();
    let encoded = encode_wardrobe(&tags, &outfits).expect("Failed to encode");
    let encode_time = encode_start.elapsed();
    println!("\nEncode: {} bytes in {:?}", encoded.len(), encode_time);
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), encode_time));
    println!("  Per outfit: {:.1} bytes", encoded.len() as f64 / outfits.len().max(1) as f64);

    // Benchmark decoding
    let decode_start = Instant::now();
    let decoded = decode_wardrobe(&encoded).expect("Failed to decode");
    let decode_time = decode_start.elapsed();
    println!("\nDecode: {} outfits in {:?}", decoded.outfits.len(), decode_time);
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), decode_time));
    assert_eq!(decoded.outfits.len(), outfits.len(), "Outfit count mismatch");
    assert_eq!(decoded.tags, tags, "Tag registry mismatch");

    // Benchmark JSON export
    let wardrobe = Wardrobe::new(tags, outfits);
    let json_start = Instant::now();
    let json = export_wardrobe(ExportFormat::Json, &wardrobe).expect("Failed to export JSON");
    let json_time = json_start.elapsed();
    println!("\nJSON export: {} bytes in {:?}", json.bytes.len(), json_time);
    println!(
        "  Binary is {:.1}x smaller",
        json.bytes.len() as f64 / encoded.len() as f64
    );
}

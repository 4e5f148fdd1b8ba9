//! Schema validation for wardrobes.
//!
//! The binary layout stores counts and lengths in single bytes and packs
//! several floats as f16, so data must be checked before it is encoded.
//! Validation is all-or-nothing over a batch: one bad tag or outfit rejects
//! the whole encode, and nothing is written.
//!
//! Structural shape (field presence, types, enum membership, unknown
//! fields) is carried by the typed model. [`parse_untyped`] extends the same
//! guarantee to dynamically-typed input.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::limits::{
    FORMAT_VERSION, MAX_ASSETS_PER_RUN, MAX_F16, MAX_NAME_LEN, MAX_SAFE_INTEGER, MAX_TAG_LEN,
    MAX_TAG_REFS, MAX_TAGS, MAX_THUMBNAIL_LEN,
};
use crate::model::{Asset, Outfit, Vec3, Wardrobe};

/// Closed interval a float field must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` is a number inside the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Body scales (height, width, head, depth, proportion).
pub const SCALE: Bounds = Bounds::new(0.0, 2.0);
/// Normalized values (body type).
pub const NORMALIZED: Bounds = Bounds::new(0.0, 1.0);
/// Finite half-precision range (puffiness).
pub const F16_RANGE: Bounds = Bounds::new(-(MAX_F16 as f64), MAX_F16 as f64);
/// Finite single-precision range (vector components).
pub const F32_RANGE: Bounds = Bounds::new(f32::MIN as f64, f32::MAX as f64);

/// Float fields of an outfit paired with their constraints, in wire order.
fn outfit_float_fields(outfit: &Outfit) -> [(&'static str, f32, Bounds); 6] {
    [
        ("width", outfit.width, SCALE),
        ("height", outfit.height, SCALE),
        ("head", outfit.head, SCALE),
        ("depth", outfit.depth, SCALE),
        ("proportion", outfit.proportion, SCALE),
        ("bodyType", outfit.body_type, NORMALIZED),
    ]
}

fn check_float(field: &'static str, value: f32, bounds: Bounds) -> Result<(), ValidationError> {
    if value.is_nan() {
        return Err(ValidationError::NotANumber { field });
    }
    let value = value as f64;
    if !bounds.contains(value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

fn check_safe_integer(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value > MAX_SAFE_INTEGER {
        return Err(ValidationError::UnsafeInteger {
            field,
            value,
            max: MAX_SAFE_INTEGER,
        });
    }
    Ok(())
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), ValidationError> {
    if len > max {
        return Err(ValidationError::LengthExceedsLimit { field, len, max });
    }
    Ok(())
}

fn check_vec3(field: &'static str, v: &Vec3) -> Result<(), ValidationError> {
    check_float(field, v.x, F32_RANGE)?;
    check_float(field, v.y, F32_RANGE)?;
    check_float(field, v.z, F32_RANGE)
}

/// Validates the tag registry.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    check_len("tags", tags.len(), MAX_TAGS)?;
    for (index, tag) in tags.iter().enumerate() {
        check_len("tag", tag.len(), MAX_TAG_LEN).map_err(|e| ValidationError::Tag {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

/// Validates a single asset reference.
pub fn validate_asset(asset: &Asset) -> Result<(), ValidationError> {
    check_safe_integer("id", asset.id())?;
    if let Asset::WithMetadata(meta) = asset {
        check_float("puffiness", meta.puffiness, F16_RANGE)?;
        check_vec3("position", &meta.position)?;
        check_vec3("rotation", &meta.rotation)?;
        check_vec3("scale", &meta.scale)?;
    }
    Ok(())
}

/// Validates a single outfit against every field constraint.
pub fn validate_outfit(outfit: &Outfit) -> Result<(), ValidationError> {
    check_len("name", outfit.name.len(), MAX_NAME_LEN)?;

    check_safe_integer("created", outfit.created)?;
    check_safe_integer("modified", outfit.modified)?;
    check_safe_integer("lastUsed", outfit.last_used)?;

    check_len("tags", outfit.tags.len(), MAX_TAG_REFS)?;

    for (field, value, bounds) in outfit_float_fields(outfit) {
        check_float(field, value, bounds)?;
    }

    let with_metadata = outfit.assets_with_metadata();
    check_len("assets with metadata", with_metadata, MAX_ASSETS_PER_RUN)?;
    check_len(
        "assets without metadata",
        outfit.assets.len() - with_metadata,
        MAX_ASSETS_PER_RUN,
    )?;
    for (index, asset) in outfit.assets.iter().enumerate() {
        validate_asset(asset).map_err(|e| ValidationError::Asset {
            index,
            source: Box::new(e),
        })?;
    }

    if outfit.thumbnail.len() as u64 > MAX_THUMBNAIL_LEN {
        return Err(ValidationError::LengthExceedsLimit {
            field: "thumbnail",
            len: outfit.thumbnail.len(),
            max: MAX_THUMBNAIL_LEN as usize,
        });
    }

    Ok(())
}

/// Validates a tag registry and an outfit list as one batch.
///
/// The first violation is returned, annotated with the failing outfit's index.
pub fn validate_batch(tags: &[String], outfits: &[Outfit]) -> Result<(), ValidationError> {
    validate_tags(tags)?;
    for (index, outfit) in outfits.iter().enumerate() {
        validate_outfit(outfit).map_err(|e| ValidationError::Outfit {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

/// Validates a whole wardrobe envelope, including its version.
pub fn validate_wardrobe(wardrobe: &Wardrobe) -> Result<(), ValidationError> {
    if wardrobe.version != FORMAT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: wardrobe.version,
        });
    }
    validate_batch(&wardrobe.tags, &wardrobe.outfits)
}

/// Returns true if the batch passes every constraint.
pub fn is_valid(tags: &[String], outfits: &[Outfit]) -> bool {
    validate_batch(tags, outfits).is_ok()
}

/// Strictly parses dynamically-typed input into a validated batch.
///
/// `tags` must be an array of strings and `outfits` an array of outfit
/// objects with exactly the model's fields. Anything else is rejected.
pub fn parse_untyped(
    tags: &Value,
    outfits: &Value,
) -> Result<(Vec<String>, Vec<Outfit>), ValidationError> {
    let tags = Vec::<String>::deserialize(tags).map_err(|e| ValidationError::Malformed {
        what: "tags",
        message: e.to_string(),
    })?;
    let outfits = Vec::<Outfit>::deserialize(outfits).map_err(|e| ValidationError::Malformed {
        what: "outfits",
        message: e.to_string(),
    })?;
    validate_batch(&tags, &outfits)?;
    Ok((tags, outfits))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{AssetWithMetadata, OutfitBuilder};

    fn valid_outfit() -> Outfit {
        OutfitBuilder::new("Regulus Corneas - レグルス・コルニアス")
            .created(1727368869884)
            .modified(1727368882829)
            .use_count(8471)
            .scales(2.0, 0.043, 1.253, 0.591, 0.333)
            .body_type(0.5)
            .asset(112752184)
            .asset_with_metadata(AssetWithMetadata::new(1817955101345922))
            .build()
    }

    #[test]
    fn test_valid_batch() {
        let tags = vec!["Dog".to_string(), "Cat".to_string()];
        assert!(validate_batch(&tags, &[valid_outfit()]).is_ok());
        assert!(is_valid(&[], &[]));
    }

    #[test]
    fn test_tag_limits() {
        let too_many: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        assert!(matches!(
            validate_tags(&too_many),
            Err(ValidationError::LengthExceedsLimit { field: "tags", len: 256, .. })
        ));

        let long_tag = vec!["ok".to_string(), "é".repeat(128)];
        assert!(matches!(
            validate_tags(&long_tag),
            Err(ValidationError::Tag { index: 1, .. })
        ));

        let at_limit = vec!["a".repeat(255); 255];
        assert!(validate_tags(&at_limit).is_ok());
    }

    #[test]
    fn test_name_length_is_measured_in_bytes() {
        let mut outfit = valid_outfit();
        outfit.name = "あ".repeat(85); // 255 bytes
        assert!(validate_outfit(&outfit).is_ok());
        outfit.name.push('a');
        assert!(matches!(
            validate_outfit(&outfit),
            Err(ValidationError::LengthExceedsLimit { field: "name", .. })
        ));
    }

    #[test]
    fn test_float_domains() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.1, 2.01] {
            let mut outfit = valid_outfit();
            outfit.height = bad;
            assert!(validate_outfit(&outfit).is_err(), "height {bad} accepted");
        }

        let mut outfit = valid_outfit();
        outfit.body_type = 1.5;
        assert!(matches!(
            validate_outfit(&outfit),
            Err(ValidationError::OutOfRange { field: "bodyType", .. })
        ));

        outfit.body_type = f32::NAN;
        assert!(matches!(
            validate_outfit(&outfit),
            Err(ValidationError::NotANumber { field: "bodyType" })
        ));
    }

    #[test]
    fn test_safe_integer_ceiling() {
        let mut outfit = valid_outfit();
        outfit.created = MAX_SAFE_INTEGER;
        assert!(validate_outfit(&outfit).is_ok());
        outfit.created = MAX_SAFE_INTEGER + 1;
        assert!(matches!(
            validate_outfit(&outfit),
            Err(ValidationError::UnsafeInteger { field: "created", .. })
        ));

        let asset = Asset::WithoutMetadata { id: u64::MAX };
        assert!(validate_asset(&asset).is_err());
    }

    #[test]
    fn test_asset_metadata_domains() {
        let mut meta = AssetWithMetadata::new(5);
        meta.puffiness = 70000.0;
        assert!(validate_asset(&Asset::WithMetadata(meta)).is_err());

        let mut meta = AssetWithMetadata::new(5);
        meta.rotation.y = f32::INFINITY;
        assert!(matches!(
            validate_asset(&Asset::WithMetadata(meta)),
            Err(ValidationError::OutOfRange { field: "rotation", .. })
        ));

        let mut meta = AssetWithMetadata::new(5);
        meta.position.x = f32::NAN;
        assert!(validate_asset(&Asset::WithMetadata(meta)).is_err());
    }

    #[test]
    fn test_asset_run_limits() {
        let mut outfit = valid_outfit();
        outfit.assets = (0..256).map(|id| Asset::WithoutMetadata { id }).collect();
        assert!(validate_outfit(&outfit).is_err());

        outfit.assets = (0..255).map(|id| Asset::WithoutMetadata { id }).collect();
        outfit
            .assets
            .extend((0..255).map(|id| Asset::WithMetadata(AssetWithMetadata::new(id))));
        assert!(validate_outfit(&outfit).is_ok());
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut bad = valid_outfit();
        bad.proportion = 3.0;
        let outfits = vec![valid_outfit(), valid_outfit(), bad];
        assert!(matches!(
            validate_batch(&[], &outfits),
            Err(ValidationError::Outfit { index: 2, .. })
        ));
        assert!(!is_valid(&[], &outfits));
    }

    #[test]
    fn test_wardrobe_version() {
        let mut wardrobe = Wardrobe::new(vec![], vec![valid_outfit()]);
        assert!(validate_wardrobe(&wardrobe).is_ok());
        wardrobe.version = 1;
        assert!(matches!(
            validate_wardrobe(&wardrobe),
            Err(ValidationError::UnsupportedVersion { version: 1 })
        ));
    }

    #[test]
    fn test_untyped_adversarial_corpus() {
        let corpus = [
            Value::Null,
            json!(true),
            json!(false),
            json!(-1),
            json!(0),
            json!(1),
            json!(1.5),
            json!(""),
            json!("hello"),
            json!([1, 2, 3]),
            json!({}),
            json!({ "key": "value" }),
            json!([{}]),
            json!([null]),
        ];
        for item in &corpus {
            assert!(
                matches!(parse_untyped(item, item), Err(ValidationError::Malformed { .. })),
                "accepted {item}"
            );
            assert!(
                matches!(parse_untyped(&json!([]), item), Err(ValidationError::Malformed { .. })),
                "accepted outfits {item}"
            );
        }
    }

    #[test]
    fn test_untyped_valid_input() {
        let outfit = serde_json::to_value(valid_outfit()).unwrap();
        let (tags, outfits) = parse_untyped(&json!(["Dog"]), &json!([outfit])).unwrap();
        assert_eq!(tags, vec!["Dog"]);
        assert_eq!(outfits.len(), 1);
        assert_eq!(outfits[0].name, valid_outfit().name);
    }

    #[test]
    fn test_untyped_rejects_shape_and_range_violations() {
        let base = serde_json::to_value(valid_outfit()).unwrap();

        let mut extra = base.clone();
        extra["hasMetadata"] = json!(true);
        assert!(parse_untyped(&json!([]), &json!([extra])).is_err());

        let mut missing = base.clone();
        missing.as_object_mut().unwrap().remove("thumbnail");
        assert!(parse_untyped(&json!([]), &json!([missing])).is_err());

        let mut wrong_color = base.clone();
        wrong_color["torsoColor"]["g"] = json!(256);
        assert!(parse_untyped(&json!([]), &json!([wrong_color])).is_err());

        let mut wrong_avatar = base.clone();
        wrong_avatar["avatarType"] = json!(2);
        assert!(parse_untyped(&json!([]), &json!([wrong_avatar])).is_err());

        let mut fractional = base.clone();
        fractional["useCount"] = json!(1.5);
        assert!(parse_untyped(&json!([]), &json!([fractional])).is_err());

        let mut out_of_range = base.clone();
        out_of_range["width"] = json!(2.5);
        assert!(matches!(
            parse_untyped(&json!([]), &json!([out_of_range])),
            Err(ValidationError::Outfit { index: 0, .. })
        ));

        assert!(parse_untyped(&json!([1]), &json!([])).is_err());
    }
}

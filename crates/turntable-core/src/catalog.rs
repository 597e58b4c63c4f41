//! Track catalog: ordered, immutable track descriptors.

use crate::config::PlayerConfig;
use crate::error::CatalogError;
use fnv::FnvHasher;
use glam::Vec3;
use serde::Deserialize;
use std::hash::Hasher;

pub const DEFAULT_PALETTE: [[f32; 3]; 2] = [
    [0.04, 0.05, 0.12], // deep navy
    [0.77, 0.64, 0.35], // warm gold
];
pub const DEFAULT_NOISE_SCALE: f32 = 1.5;
pub const DEFAULT_NOISE_SPEED: f32 = 0.1;
pub const DEFAULT_REACTIVITY: f32 = 0.6;

/// Background shader parameters for a track.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualStyle {
    pub palette: [Vec3; 2],
    pub noise_scale: f32,
    pub noise_speed: f32,
    pub reactivity: f32,
    pub waveform_seed: Option<u64>,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            palette: [
                Vec3::from_array(DEFAULT_PALETTE[0]),
                Vec3::from_array(DEFAULT_PALETTE[1]),
            ],
            noise_scale: DEFAULT_NOISE_SCALE,
            noise_speed: DEFAULT_NOISE_SPEED,
            reactivity: DEFAULT_REACTIVITY,
            waveform_seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackDescriptor {
    pub id: String,
    /// May contain inline emphasis markup such as `<em>`.
    pub title: String,
    pub artist: String,
    pub album: String,
    pub producer: String,
    pub year: String,
    pub catalog_no: String,
    pub number: String,
    pub src: String,
    pub accent_color: Vec3,
    pub style: VisualStyle,
}

impl TrackDescriptor {
    /// Seed for this track's scrubber waveform.
    pub fn waveform_seed(&self) -> u64 {
        self.style
            .waveform_seed
            .unwrap_or_else(|| stable_hash(&self.id))
    }
}

// FNV is stable across builds, unlike `DefaultHasher`.
fn stable_hash(s: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(s.as_bytes());
    hasher.finish()
}

/// Parse `#rgb` or `#rrggbb` into an RGB vector in \[0, 1\].
pub fn parse_hex_color(value: &str) -> Result<Vec3, CatalogError> {
    let invalid = || CatalogError::InvalidColor {
        value: value.to_string(),
    };
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| -> Result<f32, CatalogError> {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| invalid())
    };
    Ok(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Deserialize)]
struct RawCatalogFile {
    #[serde(default)]
    config: PlayerConfig,
    tracks: Vec<RawTrack>,
}

#[derive(Deserialize)]
struct RawTrack {
    id: String,
    title: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    album: String,
    #[serde(default)]
    producer: String,
    #[serde(default)]
    year: String,
    #[serde(default, rename = "catalog")]
    catalog_no: String,
    #[serde(default)]
    number: String,
    src: String,
    accent: String,
    #[serde(default)]
    style: Option<RawStyle>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawStyle {
    palette: Option<[String; 2]>,
    noise_scale: Option<f32>,
    noise_speed: Option<f32>,
    reactivity: Option<f32>,
    waveform_seed: Option<u64>,
}

impl RawStyle {
    fn into_style(self) -> Result<VisualStyle, CatalogError> {
        let defaults = VisualStyle::default();
        let palette = match self.palette {
            Some([a, b]) => [parse_hex_color(&a)?, parse_hex_color(&b)?],
            None => defaults.palette,
        };
        Ok(VisualStyle {
            palette,
            noise_scale: self.noise_scale.unwrap_or(defaults.noise_scale),
            noise_speed: self.noise_speed.unwrap_or(defaults.noise_speed),
            reactivity: self
                .reactivity
                .map(|r| r.clamp(0.0, 1.0))
                .unwrap_or(defaults.reactivity),
            waveform_seed: self.waveform_seed,
        })
    }
}

impl RawTrack {
    fn into_descriptor(self) -> Result<TrackDescriptor, CatalogError> {
        let accent_color = parse_hex_color(&self.accent)?;
        let style = self.style.unwrap_or_default().into_style()?;
        Ok(TrackDescriptor {
            id: self.id,
            title: self.title,
            artist: self.artist,
            album: self.album,
            producer: self.producer,
            year: self.year,
            catalog_no: self.catalog_no,
            number: self.number,
            src: self.src,
            accent_color,
            style,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    tracks: Vec<TrackDescriptor>,
}

impl Catalog {
    pub fn new(tracks: Vec<TrackDescriptor>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { tracks })
    }

    /// Parse a catalog file, returning the tracks and the (validated) config.
    pub fn from_json(json: &str) -> Result<(Self, PlayerConfig), CatalogError> {
        let raw: RawCatalogFile = serde_json::from_str(json)?;
        raw.config.validate()?;
        let tracks = raw
            .tracks
            .into_iter()
            .map(RawTrack::into_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((Self::new(tracks)?, raw.config))
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}

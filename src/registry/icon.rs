//! Closed icon enumeration for resolution steps.
//!
//! Records store the icon as a plain string key; rendering resolves the key
//! through this table so an unrecognized value degrades to a fixed fallback
//! instead of failing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIcon {
    Handshake,
    Scales,
    Gavel,
    Document,
    Globe,
    Shield,
}

impl StepIcon {
    pub const FALLBACK: StepIcon = StepIcon::Handshake;

    /// Total lookup: unknown keys resolve to the fallback variant.
    pub fn from_key(key: &str) -> StepIcon {
        match key {
            "handshake" => StepIcon::Handshake,
            "scales" => StepIcon::Scales,
            "gavel" => StepIcon::Gavel,
            "document" => StepIcon::Document,
            "globe" => StepIcon::Globe,
            "shield" => StepIcon::Shield,
            _ => StepIcon::FALLBACK,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            StepIcon::Handshake => "handshake",
            StepIcon::Scales => "scales",
            StepIcon::Gavel => "gavel",
            StepIcon::Document => "document",
            StepIcon::Globe => "globe",
            StepIcon::Shield => "shield",
        }
    }

    /// Glyph used by the text renderer in the admin CLI
    pub fn glyph(&self) -> &'static str {
        match self {
            StepIcon::Handshake => "🤝",
            StepIcon::Scales => "⚖",
            StepIcon::Gavel => "🔨",
            StepIcon::Document => "📄",
            StepIcon::Globe => "🌐",
            StepIcon::Shield => "🛡",
        }
    }
}

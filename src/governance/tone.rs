// CLASSIFICATION: COMMUNITY
// Filename: tone.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Tone tags derived from a proposal's free-text toneform.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneTag {
    GentleJoy,
    PracticalCare,
    ClimateMourning,
    Other,
}

impl ToneTag {
    /// Fixed tally order.
    pub const ALL: [ToneTag; 4] = [
        ToneTag::GentleJoy,
        ToneTag::PracticalCare,
        ToneTag::ClimateMourning,
        ToneTag::Other,
    ];

    /// Case-insensitive keyword match. Several keywords can co-occur, so the
    /// check order is part of the contract: joy, care, climate/mourning.
    pub fn classify(toneform: &str) -> Self {
        let lowered = toneform.to_lowercase();
        if lowered.contains("joy") {
            ToneTag::GentleJoy
        } else if lowered.contains("care") {
            ToneTag::PracticalCare
        } else if lowered.contains("climate") || lowered.contains("mourning") {
            ToneTag::ClimateMourning
        } else {
            ToneTag::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToneTag::GentleJoy => "Gentle Joy",
            ToneTag::PracticalCare => "Practical Care",
            ToneTag::ClimateMourning => "Climate Mourning",
            ToneTag::Other => "Other",
        }
    }

    fn slot(self) -> usize {
        match self {
            ToneTag::GentleJoy => 0,
            ToneTag::PracticalCare => 1,
            ToneTag::ClimateMourning => 2,
            ToneTag::Other => 3,
        }
    }
}

impl fmt::Display for ToneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ToneTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Per-tag counts. Every tag is always present, zero or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToneTally {
    counts: [u64; 4],
}

impl ToneTally {
    pub fn record(&mut self, tag: ToneTag) {
        self.counts[tag.slot()] += 1;
    }

    pub fn get(&self, tag: ToneTag) -> u64 {
        self.counts[tag.slot()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Tags in fixed order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (ToneTag, u64)> + '_ {
        ToneTag::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}

impl FromIterator<ToneTag> for ToneTally {
    fn from_iter<I: IntoIterator<Item = ToneTag>>(iter: I) -> Self {
        let mut tally = ToneTally::default();
        for tag in iter {
            tally.record(tag);
        }
        tally
    }
}

impl Serialize for ToneTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ToneTag::ALL.len()))?;
        for (tag, count) in self.iter() {
            map.serialize_entry(tag.label(), &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_priority() {
        assert_eq!(ToneTag::classify("climate joy"), ToneTag::GentleJoy);
        assert_eq!(ToneTag::classify("careful mourning"), ToneTag::PracticalCare);
        assert_eq!(ToneTag::classify("tone-climate-mourning"), ToneTag::ClimateMourning);
        assert_eq!(ToneTag::classify("MOURNING"), ToneTag::ClimateMourning);
        assert_eq!(ToneTag::classify("Tone-Gentle-JOY"), ToneTag::GentleJoy);
        assert_eq!(ToneTag::classify(""), ToneTag::Other);
        assert_eq!(ToneTag::classify("quiet presence"), ToneTag::Other);
    }

    #[test]
    fn empty_tally_serializes_every_tag() {
        let v = serde_json::to_value(ToneTally::default()).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for tag in ToneTag::ALL {
            assert_eq!(obj[tag.label()], 0);
        }
    }

    #[test]
    fn tally_counts() {
        let tally: ToneTally = ["joy", "care", "joy", "???"]
            .iter()
            .map(|s| ToneTag::classify(s))
            .collect();
        assert_eq!(tally.get(ToneTag::GentleJoy), 2);
        assert_eq!(tally.get(ToneTag::PracticalCare), 1);
        assert_eq!(tally.get(ToneTag::ClimateMourning), 0);
        assert_eq!(tally.get(ToneTag::Other), 1);
        assert_eq!(tally.total(), 4);
    }
}

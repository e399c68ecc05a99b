//! Preset Beliefs
//!
//! The fixed table of beliefs available without a parameter generator.

use crate::components::belief::{BeliefId, BeliefParams, BeliefProfile};

/// (name, description, virality, stickiness, resistance, polarization, emotional impact, color)
const PRESETS: &[PresetEntry] = &[
    (
        "Social Media Misinformation",
        "False news spreads faster than truth on social platforms",
        0.85, 0.4, 0.3, 0.7, 0.6,
        "#ef4444",
    ),
    (
        "Health Conspiracy Theory",
        "Alternative medicine claims without scientific backing",
        0.6, 0.8, 0.6, 0.9, 0.8,
        "#f59e0b",
    ),
    (
        "Positive Movement",
        "Grassroots movement for social good",
        0.5, 0.9, 0.2, 0.1, 0.7,
        "#10b981",
    ),
    (
        "Economic Panic",
        "Fear-driven financial behavior (bank runs, hoarding)",
        0.9, 0.3, 0.4, 0.5, 0.9,
        "#dc2626",
    ),
    (
        "Scientific Breakthrough",
        "Revolutionary discovery that changes worldview",
        0.4, 0.95, 0.7, 0.3, 0.5,
        "#3b82f6",
    ),
    (
        "Celebrity Endorsement",
        "Popular figure promotes idea or product",
        0.8, 0.4, 0.3, 0.4, 0.6,
        "#8b5cf6",
    ),
];

type PresetEntry = (&'static str, &'static str, f32, f32, f32, f32, f32, &'static str);

fn build_preset(index: usize, entry: &PresetEntry) -> BeliefProfile {
    let &(name, description, virality, stickiness, resistance, polarization, emotional, color) = entry;
    BeliefProfile::new(
        BeliefId::preset(index + 1),
        name,
        description,
        BeliefParams::new(virality, stickiness, resistance, polarization, emotional),
        color,
    )
}

/// All preset beliefs, ids `preset_01` onward in table order
pub fn preset_beliefs() -> Vec<BeliefProfile> {
    PRESETS
        .iter()
        .enumerate()
        .map(|(i, entry)| build_preset(i, entry))
        .collect()
}

/// The belief selected when nothing else is chosen
pub fn default_belief() -> BeliefProfile {
    build_preset(0, &PRESETS[0])
}

/// Look up a preset by exact or case-insensitive name
pub fn find_preset(name: &str) -> Option<BeliefProfile> {
    let beliefs = preset_beliefs();
    beliefs
        .iter()
        .position(|b| b.name == name)
        .or_else(|| beliefs.iter().position(|b| b.name.eq_ignore_ascii_case(name)))
        .map(|i| beliefs[i].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_presets_with_stable_ids() {
        let presets = preset_beliefs();
        assert_eq!(presets.len(), 6);
        assert_eq!(presets[0].id.as_str(), "preset_01");
        assert_eq!(presets[5].id.as_str(), "preset_06");
        assert!(presets.iter().all(|b| !b.is_custom));
    }

    #[test]
    fn test_default_is_first_preset() {
        let belief = default_belief();
        assert_eq!(belief.name, "Social Media Misinformation");
        assert_eq!(belief.params.virality(), 0.85);
        assert!(belief.mentions_media());
    }

    #[test]
    fn test_find_preset_by_name() {
        assert_eq!(
            find_preset("economic panic").unwrap().id,
            BeliefId::preset(4)
        );
        assert!(find_preset("Nonexistent").is_none());
    }
}

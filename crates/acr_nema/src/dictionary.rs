//! Lookups into the standard data dictionary

use dicom_core::dictionary::{DataDictionary, DataDictionaryEntry};
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;

static DICTIONARY: StandardDataDictionary = StandardDataDictionary;

/// VR to assume for an element whose record does not carry one
pub fn default_vr(tag: Tag) -> VR {
    if tag.element() == 0x0000 {
        // Group length
        return VR::UL;
    }
    DICTIONARY
        .by_tag(tag)
        .map(|entry| entry.vr().relaxed())
        .unwrap_or(VR::UN)
}

/// Keyword of the attribute, when the dictionary knows it
pub fn attribute_name(tag: Tag) -> Option<&'static str> {
    if tag.element() == 0x0000 {
        return Some("GroupLength");
    }
    DICTIONARY.by_tag(tag).map(|entry| entry.alias())
}

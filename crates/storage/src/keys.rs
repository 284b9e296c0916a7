//! Storage key names
//!
//! These names are shared with existing installs and must not change.

/// Known collection
pub const KNOWN_WORDS: &str = "knownWords";
/// To-learn collection
pub const TO_LEARN_WORDS: &str = "toLearnWords";
/// Processing collection
pub const PROCESSING_WORDS: &str = "processingWords";
/// Selected language, two-letter code
pub const SELECTED_LANGUAGE_TWO: &str = "selectedLanguageTwo";
/// Selected language, three-letter code
pub const SELECTED_LANGUAGE_THREE: &str = "selectedLanguageThree";
/// Selected language, display name
pub const SELECTED_LANGUAGE_NAME: &str = "selectedLanguageName";

/// Keys holding word collections
pub const WORD_KEYS: [&str; 3] = [KNOWN_WORDS, TO_LEARN_WORDS, PROCESSING_WORDS];

/// Keys holding the language selection
pub const LANGUAGE_KEYS: [&str; 3] =
    [SELECTED_LANGUAGE_TWO, SELECTED_LANGUAGE_THREE, SELECTED_LANGUAGE_NAME];

//! 極性・主観性の説明文

use crate::types::Locale;

/// 極性の強さ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Very,
    Moderately,
    Slightly,
    Neutral,
}

impl Intensity {
    /// 絶対値で判定: 0.7以上 / 0.3以上 / 0.05以上 / それ未満
    pub fn from_polarity(polarity: f64) -> Self {
        let abs = polarity.abs();
        if abs >= 0.7 {
            Intensity::Very
        } else if abs >= 0.3 {
            Intensity::Moderately
        } else if abs >= 0.05 {
            Intensity::Slightly
        } else {
            Intensity::Neutral
        }
    }
}

/// 主観性の度合い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectivityLevel {
    Very,
    Moderately,
    Slightly,
    Objective,
}

impl SubjectivityLevel {
    pub fn from_subjectivity(subjectivity: f64) -> Self {
        if subjectivity >= 0.7 {
            SubjectivityLevel::Very
        } else if subjectivity >= 0.4 {
            SubjectivityLevel::Moderately
        } else if subjectivity >= 0.1 {
            SubjectivityLevel::Slightly
        } else {
            SubjectivityLevel::Objective
        }
    }
}

/// 極性の説明（英語）: "Very positive", "Slightly negative", "Neutral" など
pub fn describe_polarity_intensity(polarity: f64) -> String {
    describe_polarity_intensity_in(polarity, Locale::En)
}

/// 主観性の説明（英語）: "Very subjective" 〜 "Objective"
pub fn describe_subjectivity(subjectivity: f64) -> String {
    describe_subjectivity_in(subjectivity, Locale::En)
}

pub fn describe_polarity_intensity_in(polarity: f64, locale: Locale) -> String {
    let intensity = match (Intensity::from_polarity(polarity), locale) {
        (Intensity::Neutral, _) => return "Neutral".to_string(),
        (Intensity::Very, Locale::En) => "Very",
        (Intensity::Moderately, Locale::En) => "Moderately",
        (Intensity::Slightly, Locale::En) => "Slightly",
        (Intensity::Very, Locale::Es) => "Muy",
        (Intensity::Moderately, Locale::Es) => "Moderadamente",
        (Intensity::Slightly, Locale::Es) => "Ligeramente",
    };

    let direction = match (polarity > 0.0, locale) {
        (true, Locale::En) => "positive",
        (false, Locale::En) => "negative",
        (true, Locale::Es) => "positivo",
        (false, Locale::Es) => "negativo",
    };

    format!("{} {}", intensity, direction)
}

pub fn describe_subjectivity_in(subjectivity: f64, locale: Locale) -> String {
    let text = match (SubjectivityLevel::from_subjectivity(subjectivity), locale) {
        (SubjectivityLevel::Very, Locale::En) => "Very subjective",
        (SubjectivityLevel::Moderately, Locale::En) => "Moderately subjective",
        (SubjectivityLevel::Slightly, Locale::En) => "Slightly subjective",
        (SubjectivityLevel::Objective, Locale::En) => "Objective",
        (SubjectivityLevel::Very, Locale::Es) => "Muy subjetivo",
        (SubjectivityLevel::Moderately, Locale::Es) => "Moderadamente subjetivo",
        (SubjectivityLevel::Slightly, Locale::Es) => "Ligeramente subjetivo",
        (SubjectivityLevel::Objective, Locale::Es) => "Objetivo",
    };
    text.to_string()
}

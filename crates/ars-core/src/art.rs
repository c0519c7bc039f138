//! The two axes of Hermetic magic: Techniques (what the magus does) and
//! Forms (what the magic acts upon).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Hermetic Technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Technique {
    /// I create.
    Creo,
    /// I perceive.
    Intellego,
    /// I transform.
    Muto,
    /// I destroy.
    Perdo,
    /// I control.
    Rego,
}

impl Technique {
    /// All Techniques in canonical order.
    pub fn all() -> &'static [Self] {
        &[Self::Creo, Self::Intellego, Self::Muto, Self::Perdo, Self::Rego]
    }

    /// Parse a Technique from its full name or two-letter abbreviation
    /// ("Creo", "cr", "REGO").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "creo" | "cr" => Some(Self::Creo),
            "intellego" | "in" => Some(Self::Intellego),
            "muto" | "mu" => Some(Self::Muto),
            "perdo" | "pe" => Some(Self::Perdo),
            "rego" | "re" => Some(Self::Rego),
            _ => None,
        }
    }

    /// The two-letter abbreviation used in spell names ("Cr", "Re", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Creo => "Cr",
            Self::Intellego => "In",
            Self::Muto => "Mu",
            Self::Perdo => "Pe",
            Self::Rego => "Re",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creo => write!(f, "Creo"),
            Self::Intellego => write!(f, "Intellego"),
            Self::Muto => write!(f, "Muto"),
            Self::Perdo => write!(f, "Perdo"),
            Self::Rego => write!(f, "Rego"),
        }
    }
}

/// A Hermetic Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Form {
    /// Animals.
    Animal,
    /// Water and liquids.
    Aquam,
    /// Air and weather.
    Auram,
    /// The human body.
    Corpus,
    /// Plants.
    Herbam,
    /// Fire, heat, and light.
    Ignem,
    /// Images and senses.
    Imaginem,
    /// Minds.
    Mentem,
    /// Earth and stone.
    Terram,
    /// Raw magic.
    Vim,
}

impl Form {
    /// All Forms in canonical order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Animal,
            Self::Aquam,
            Self::Auram,
            Self::Corpus,
            Self::Herbam,
            Self::Ignem,
            Self::Imaginem,
            Self::Mentem,
            Self::Terram,
            Self::Vim,
        ]
    }

    /// Parse a Form from its full name or two-letter abbreviation
    /// ("Ignem", "ig", "VIM").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "animal" | "an" => Some(Self::Animal),
            "aquam" | "aq" => Some(Self::Aquam),
            "auram" | "au" => Some(Self::Auram),
            "corpus" | "co" => Some(Self::Corpus),
            "herbam" | "he" => Some(Self::Herbam),
            "ignem" | "ig" => Some(Self::Ignem),
            "imaginem" | "im" => Some(Self::Imaginem),
            "mentem" | "me" => Some(Self::Mentem),
            "terram" | "te" => Some(Self::Terram),
            "vim" | "vi" => Some(Self::Vim),
            _ => None,
        }
    }

    /// The two-letter abbreviation used in spell names ("Ig", "Vi", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Animal => "An",
            Self::Aquam => "Aq",
            Self::Auram => "Au",
            Self::Corpus => "Co",
            Self::Herbam => "He",
            Self::Ignem => "Ig",
            Self::Imaginem => "Im",
            Self::Mentem => "Me",
            Self::Terram => "Te",
            Self::Vim => "Vi",
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Animal => write!(f, "Animal"),
            Self::Aquam => write!(f, "Aquam"),
            Self::Auram => write!(f, "Auram"),
            Self::Corpus => write!(f, "Corpus"),
            Self::Herbam => write!(f, "Herbam"),
            Self::Ignem => write!(f, "Ignem"),
            Self::Imaginem => write!(f, "Imaginem"),
            Self::Mentem => write!(f, "Mentem"),
            Self::Terram => write!(f, "Terram"),
            Self::Vim => write!(f, "Vim"),
        }
    }
}

/// A Technique + Form pairing, as declared for a spell or a Certamen duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtPair {
    /// The Technique half of the pair.
    pub technique: Technique,
    /// The Form half of the pair.
    pub form: Form,
}

impl ArtPair {
    /// Pair a Technique with a Form.
    pub fn new(technique: Technique, form: Form) -> Self {
        Self { technique, form }
    }
}

impl fmt::Display for ArtPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.technique.abbreviation(),
            self.form.abbreviation()
        )
    }
}

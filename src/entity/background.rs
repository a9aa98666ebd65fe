//! Descriptive background generated once per agent

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Bootcamp,
    SelfTaught,
    Bachelors,
    Masters,
    Doctorate,
}

impl EducationLevel {
    const ALL: [EducationLevel; 6] = [
        EducationLevel::HighSchool,
        EducationLevel::Bootcamp,
        EducationLevel::SelfTaught,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::Doctorate,
    ];
}

const SKILL_POOL: &[&str] = &[
    "rust",
    "python",
    "distributed systems",
    "databases",
    "frontend",
    "security",
    "testing",
    "devops",
    "machine learning",
    "technical writing",
];

const TRAIT_POOL: &[&str] = &[
    "curious",
    "methodical",
    "pragmatic",
    "collaborative",
    "independent",
    "detail-oriented",
    "impatient",
    "calm under pressure",
];

const LIFE_EVENT_POOL: &[&str] = &[
    "shipped a product launch",
    "survived a production outage",
    "changed careers",
    "mentored a junior engineer",
    "led a migration",
    "burned out and recovered",
];

/// Immutable background of an agent
///
/// Fields are private; a background is produced once by [`Background::random`]
/// (or deserialized) and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    education: EducationLevel,
    years_experience: u32,
    skills: Vec<String>,
    personality_traits: Vec<String>,
    life_events: Vec<String>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            education: EducationLevel::SelfTaught,
            years_experience: 0,
            skills: Vec::new(),
            personality_traits: Vec::new(),
            life_events: Vec::new(),
        }
    }
}

fn pick<R: Rng + ?Sized>(pool: &[&str], count: usize, rng: &mut R) -> Vec<String> {
    pool.choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}

impl Background {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let education = EducationLevel::ALL[rng.gen_range(0..EducationLevel::ALL.len())];
        let years_experience = rng.gen_range(0..=30);
        let skill_count = rng.gen_range(2..=5);
        let trait_count = rng.gen_range(1..=3);
        let event_count = rng.gen_range(0..=3);

        Self {
            education,
            years_experience,
            skills: pick(SKILL_POOL, skill_count, rng),
            personality_traits: pick(TRAIT_POOL, trait_count, rng),
            life_events: pick(LIFE_EVENT_POOL, event_count, rng),
        }
    }

    pub fn education(&self) -> EducationLevel {
        self.education
    }

    pub fn years_experience(&self) -> u32 {
        self.years_experience
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn personality_traits(&self) -> &[String] {
        &self.personality_traits
    }

    pub fn life_events(&self) -> &[String] {
        &self.life_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_background_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let bg = Background::random(&mut rng);
            assert!(bg.years_experience() <= 30);
            assert!((2..=5).contains(&bg.skills().len()));
            assert!((1..=3).contains(&bg.personality_traits().len()));
            assert!(bg.life_events().len() <= 3);

            let mut skills = bg.skills().to_vec();
            skills.sort();
            skills.dedup();
            assert_eq!(skills.len(), bg.skills().len(), "skills must be distinct");
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let value = serde_json::to_value(Background::random(&mut rng)).unwrap();
        for key in [
            "education",
            "years_experience",
            "skills",
            "personality_traits",
            "life_events",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::mood::Mood;

pub const TIPS_PER_REQUEST: usize = 2;

pub const DAILY_GOALS: [&str; 4] = [
    "Drink 8 glasses of water",
    "Take a 10-minute mindful walk",
    "Write 3 things you're grateful for",
    "Avoid social media for 1 hour",
];

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Believe in yourself. You've got this!",
    "Your mind is a garden. Nurture it daily.",
    "Take a deep breath. You're doing great.",
    "Every emotion is valid. Let it flow.",
    "Small steps lead to big change.",
];

/// Moods the tips database has its own entries for.
pub const TIP_MOODS: [Mood; 6] = [
    Mood::Happy,
    Mood::Sad,
    Mood::Anxious,
    Mood::Calm,
    Mood::Angry,
    Mood::Motivated,
];

pub fn tips_database(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "Keep a gratitude journal to savor the good moments",
            "Spread positivity: compliment someone today",
            "Go outdoors and soak in some sunshine",
        ],
        Mood::Sad => &[
            "Try journaling how you feel and let it all out",
            "Watch your comfort movie or talk to someone you trust",
            "Take a short walk to boost your mood",
        ],
        Mood::Anxious => &[
            "Practice box breathing (4-4-4-4) for 2 minutes",
            "Limit social media for a few hours",
            "Try progressive muscle relaxation",
        ],
        Mood::Angry => &[
            "Try writing a 'no-send' letter to vent",
            "Engage in physical activity like jumping jacks",
            "Splash cold water on your face or hands",
        ],
        Mood::Motivated => &[
            "Channel your energy into a passion project",
            "Start your day with a prioritized to-do list",
            "Set a mini-goal and crush it today",
        ],
        // Neutral has no list of its own
        Mood::Calm | Mood::Neutral => &[
            "Use this calm to do something creative",
            "Practice mindfulness or silent sitting",
            "Listen to ambient music and relax",
        ],
    }
}

/// Two distinct tips for `mood`.
pub fn tips_for<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> Vec<&'static str> {
    tips_database(mood)
        .choose_multiple(rng, TIPS_PER_REQUEST)
        .copied()
        .collect()
}

pub fn random_tip_mood<R: Rng + ?Sized>(rng: &mut R) -> Mood {
    *TIP_MOODS.choose(rng).unwrap_or(&Mood::Calm)
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_QUOTES.choose(rng).copied().unwrap_or(MOTIVATIONAL_QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tips_are_two_distinct_entries_from_database() {
        let mut rng = StdRng::seed_from_u64(7);
        for mood in Mood::ALL {
            let tips = tips_for(mood, &mut rng);
            assert_eq!(tips.len(), TIPS_PER_REQUEST);
            assert_ne!(tips[0], tips[1]);
            assert!(tips.iter().all(|t| tips_database(mood).contains(t)));
        }
    }

    #[test]
    fn test_neutral_uses_calm_tips() {
        assert_eq!(tips_database(Mood::Neutral), tips_database(Mood::Calm));
    }

    #[test]
    fn test_random_picks_come_from_fixed_sets() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert!(TIP_MOODS.contains(&random_tip_mood(&mut rng)));
            assert!(MOTIVATIONAL_QUOTES.contains(&random_quote(&mut rng)));
        }
    }
}

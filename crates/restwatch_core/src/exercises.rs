use crate::error::AppError;
use rand::Rng;

const BUILTIN_PROMPTS: [&str; 12] = [
    "Blink 20 times.",
    "Roll your eyes in a clockwise circle 10 times, then in a counterclockwise circle 10 times.",
    "Hold your thumb in front of you at arm's length. Shift focus from your thumb to a distant object and back. Repeat 15 times.",
    "Close your eyes tightly for 5 seconds, then open them wide. Repeat 10 times.",
    "Draw the infinity symbol (a sideways figure-eight) with your eyes. Repeat the motion 10 times.",
    "Focus on an object about 6 inches away, then switch to an object farther away. Repeat this focusing exercise 15 times.",
    "Rapidly shift your gaze between two objects placed at least 10 feet apart. Repeat 20 times.",
    "Sit up straight with your back against the chair.",
    "Keep your feet flat on the floor.",
    "Keep your knees at a 90-degree angle.",
    "Keep your wrists straight when typing.",
    "Stretch your back and neck.",
];

/// Immutable ordered list of break-activity prompts. One prompt is drawn
/// per break; consecutive breaks may repeat.
#[derive(Debug, Clone)]
pub struct ExercisePool {
    prompts: Vec<String>,
}

impl ExercisePool {
    pub fn builtin() -> Self {
        Self {
            prompts: BUILTIN_PROMPTS.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn new(prompts: Vec<String>) -> Result<Self, AppError> {
        if prompts.iter().all(|p| p.trim().is_empty()) {
            return Err(AppError::invalid_input("at least one prompt is required"));
        }
        Ok(Self {
            prompts: prompts
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn pick<R: Rng>(&self, rng: &mut R) -> &str {
        &self.prompts[rng.gen_range(0..self.prompts.len())]
    }

    pub fn pick_random(&self) -> &str {
        self.pick(&mut rand::thread_rng())
    }
}

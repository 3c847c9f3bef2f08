//! The built-in reference evaluation set.

use crate::model::EvaluationSet;

/// Id of the built-in set.
pub const REFERENCE_SET_ID: &str = "reference";

/// Display name of the built-in set.
pub const REFERENCE_SET_NAME: &str = "AI Prompt Evaluation";

/// Reference prompts in display order. Item ids are 1-based positions.
pub const REFERENCE_PROMPTS: [&str; 13] = [
    "Tell me the name of a country whose name ends with 'lia'. Give me the capital city of that country as well.",
    "What is the number that rhymes with the word we use to describe a tall plant?",
    "Write a haiku where the second letter of each word when put together spells \"Simple\".",
    "Name an English adjective of latin origin that begins and ends with same letter, has 11 letters in total, and for which all vowels in the word are ordered alphabetically.",
    "Courtney said that there were 48 people, but Kelly said that Courtney had overstated the number by 20%. If Kelly was right, how many people were there?",
    "I have 2 apples, then I buy 2 more. I bake a pie with 2 of the apples. After eating half of the pie how many apples do I have left?",
    "Sally is a girl. She has three brothers. Each of her brothers has the same two sisters. How many sisters does Sally have?",
    "If a regular hexagon has a short diagonal of 64, what is its long diagonal?",
    "Create an HTML page with a button that explodes confetti when you click it. You can use CSS & JS as well.",
    "Create a Playable Synth Keyboard using html,css,js",
    "Generate the SVG code for a butterfly.",
    "Create me a 3d circle that moves and loops endlessly in 3d space using html,css,js.",
    "Write a game of life in python that works on the terminal.",
];

/// Build the reference set with every item ungraded.
pub fn reference_set() -> EvaluationSet {
    let entries = REFERENCE_PROMPTS
        .iter()
        .enumerate()
        .map(|(i, prompt)| (i as u32 + 1, *prompt));

    match EvaluationSet::new(REFERENCE_SET_ID, REFERENCE_SET_NAME, entries) {
        Ok(set) => set,
        // Ids are generated sequentially from 1, so construction cannot fail.
        Err(e) => unreachable!("reference set is malformed: {e}"),
    }
}

//! Built-in content tables.
//!
//! Ten learning days per table, themed around village life like the rest of
//! the curriculum. A content pack can replace any table wholesale.

use super::{
    ConceptQuestion, ContentLibrary, ErrorQuestion, MeaningPair, QuizQuestion, SentencePair,
    Story, Subject, VisualWord,
};

fn pair(day: u32, english: &str, parallel: &str, words: &[&str], difficulty: u8) -> SentencePair {
    SentencePair {
        day,
        english: english.to_string(),
        parallel: parallel.to_string(),
        words: words.iter().map(|w| w.to_string()).collect(),
        difficulty,
    }
}

fn story(day: u32, title: &str, sentences: &[&str], theme: &str, difficulty: u8) -> Story {
    Story {
        day,
        title: title.to_string(),
        sentences: sentences.iter().map(|s| s.to_string()).collect(),
        theme: theme.to_string(),
        difficulty,
    }
}

fn concept(
    day: u32,
    subject: Subject,
    step: u32,
    prompt: &str,
    options: &[&str],
    explanation: &str,
) -> ConceptQuestion {
    ConceptQuestion {
        day,
        subject,
        step,
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index: 0,
        explanation: explanation.to_string(),
    }
}

fn quiz(day: u32, prompt: &str, options: &[&str], subject: &str, difficulty: u8) -> QuizQuestion {
    QuizQuestion {
        day,
        prompt: prompt.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index: 0,
        subject: subject.to_string(),
        difficulty,
    }
}

fn error(day: u32, incorrect: &str, correct: &str, error_type: &str, explanation: &str) -> ErrorQuestion {
    ErrorQuestion {
        day,
        incorrect_sentence: incorrect.to_string(),
        correct_sentence: correct.to_string(),
        error_type: error_type.to_string(),
        explanation: explanation.to_string(),
    }
}

fn meaning(day: u32, word: &str, meaning: &str, distractors: &[&str]) -> MeaningPair {
    MeaningPair {
        day,
        word: word.to_string(),
        meaning: meaning.to_string(),
        distractors: distractors.iter().map(|d| d.to_string()).collect(),
    }
}

fn visual(day: u32, image_query: &str, correct: &str, options: &[&str], difficulty: u8) -> VisualWord {
    VisualWord {
        day,
        image_query: image_query.to_string(),
        correct_word: correct.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        difficulty,
    }
}

/// The full built-in library.
pub fn library() -> ContentLibrary {
    ContentLibrary {
        sentences: sentences(),
        stories: stories(),
        concept_questions: concept_questions(),
        quiz_questions: quiz_questions(),
        error_questions: error_questions(),
        meaning_pairs: meaning_pairs(),
        visual_words: visual_words(),
    }
}

fn sentences() -> Vec<SentencePair> {
    vec![
        pair(
            1,
            "The sun rises in the east.",
            "The sun comes up in the eastern sky.",
            &["The", "sun", "comes", "up", "in", "the", "eastern", "sky"],
            1,
        ),
        pair(
            2,
            "She loves to read books.",
            "She enjoys reading books.",
            &["She", "enjoys", "reading", "books"],
            1,
        ),
        pair(
            3,
            "The dog is barking loudly.",
            "The dog barks with a loud voice.",
            &["The", "dog", "barks", "with", "a", "loud", "voice"],
            1,
        ),
        pair(
            4,
            "Water is essential for life.",
            "Water is necessary for living.",
            &["Water", "is", "necessary", "for", "living"],
            1,
        ),
        pair(
            5,
            "Children play in the park.",
            "Kids have fun at the playground.",
            &["Kids", "have", "fun", "at", "the", "playground"],
            1,
        ),
        pair(
            6,
            "The farmer grows vegetables.",
            "The farmer cultivates crops.",
            &["The", "farmer", "cultivates", "crops"],
            1,
        ),
        pair(
            7,
            "Birds fly in the sky.",
            "Birds soar through the air.",
            &["Birds", "soar", "through", "the", "air"],
            1,
        ),
        pair(
            8,
            "He walks to school every day.",
            "He goes to school on foot daily.",
            &["He", "goes", "to", "school", "on", "foot", "daily"],
            2,
        ),
        pair(
            9,
            "The river flows through the village.",
            "The stream runs across the settlement.",
            &["The", "stream", "runs", "across", "the", "settlement"],
            2,
        ),
        pair(
            10,
            "Mother cooks delicious food.",
            "Mother prepares tasty meals.",
            &["Mother", "prepares", "tasty", "meals"],
            2,
        ),
    ]
}

fn stories() -> Vec<Story> {
    vec![
        story(
            1,
            "The Kind Farmer",
            &[
                "There was a kind farmer named Ramu.",
                "He lived in a small village.",
                "Every morning, he worked in his fields.",
                "One day, he found a wounded bird.",
                "He took care of the bird until it healed.",
                "The bird became his friend forever.",
            ],
            "village",
            1,
        ),
        story(
            2,
            "Market Day",
            &[
                "It was market day in the village.",
                "Sita went with her mother to buy vegetables.",
                "They saw many colorful fruits.",
                "Sita helped carry the bags.",
                "On the way back, they met their neighbor.",
                "They shared some fruits with her.",
            ],
            "market",
            1,
        ),
        story(
            3,
            "The School Festival",
            &[
                "The school was preparing for a festival.",
                "All students were excited.",
                "Raj practiced singing for three days.",
                "Maya prepared a beautiful dance.",
                "On festival day, parents came to watch.",
                "Everyone cheered for the children.",
            ],
            "school",
            1,
        ),
        story(
            4,
            "The Lost Calf",
            &[
                "A calf wandered away from the herd.",
                "Little Anu noticed it was missing.",
                "She followed its hoofprints to the river.",
                "The calf was stuck near the bank.",
                "Anu called the elders for help.",
                "Together they brought the calf home safely.",
            ],
            "village",
            2,
        ),
        story(
            5,
            "The First Rain",
            &[
                "The fields were dry for many weeks.",
                "Dark clouds gathered one afternoon.",
                "The first drops fell on the dusty road.",
                "Children ran outside to dance.",
                "The farmers smiled at the sky.",
                "That night the whole village slept happily.",
            ],
            "monsoon",
            2,
        ),
    ]
}

fn concept_questions() -> Vec<ConceptQuestion> {
    vec![
        concept(
            1,
            Subject::Science,
            1,
            "What do plants need to make food?",
            &["Sunlight, water, CO2", "Only water", "Only sunlight", "Soil only"],
            "Plants need sunlight, water, and carbon dioxide for photosynthesis.",
        ),
        concept(
            1,
            Subject::Science,
            2,
            "What is the process called?",
            &["Photosynthesis", "Respiration", "Digestion", "Circulation"],
            "The process of making food is called photosynthesis.",
        ),
        concept(
            1,
            Subject::Science,
            3,
            "What gives plants their green color?",
            &["Chlorophyll", "Water", "Sunlight", "Air"],
            "Chlorophyll is the green pigment in plants.",
        ),
        concept(
            2,
            Subject::Science,
            1,
            "How many states of matter are there?",
            &["Three main states", "Two", "Five", "One"],
            "The three main states are solid, liquid, and gas.",
        ),
        concept(
            2,
            Subject::Science,
            2,
            "What is water in ice form?",
            &["Solid", "Liquid", "Gas", "Plasma"],
            "Ice is the solid state of water.",
        ),
        concept(
            2,
            Subject::Science,
            3,
            "What gas do we breathe in?",
            &["Oxygen", "Carbon dioxide", "Nitrogen", "Hydrogen"],
            "We breathe in oxygen from the air.",
        ),
        concept(
            1,
            Subject::Math,
            1,
            "What is 5 + 7?",
            &["12", "11", "13", "10"],
            "5 plus 7 equals 12.",
        ),
        concept(
            1,
            Subject::Math,
            2,
            "What is 15 - 8?",
            &["7", "6", "8", "9"],
            "15 minus 8 equals 7.",
        ),
        concept(
            1,
            Subject::Math,
            3,
            "What is 4 x 3?",
            &["12", "7", "15", "10"],
            "4 times 3 equals 12.",
        ),
        concept(
            2,
            Subject::Math,
            1,
            "What is 20 / 4?",
            &["5", "4", "6", "10"],
            "20 divided by 4 equals 5.",
        ),
        concept(
            2,
            Subject::Math,
            2,
            "How many sides does a triangle have?",
            &["3", "4", "5", "6"],
            "A triangle has three sides.",
        ),
        concept(
            2,
            Subject::Math,
            3,
            "How many centimeters in 1 meter?",
            &["100", "10", "1000", "50"],
            "There are 100 centimeters in 1 meter.",
        ),
    ]
}

fn quiz_questions() -> Vec<QuizQuestion> {
    vec![
        quiz(1, "What is 12 + 9?", &["21", "19", "23", "20"], "Math", 1),
        quiz(2, "Which animal gives us milk?", &["Cow", "Dog", "Cat", "Hen"], "Science", 1),
        quiz(
            3,
            "What is the opposite of 'hot'?",
            &["Cold", "Warm", "Cool", "Wet"],
            "English",
            1,
        ),
        quiz(4, "How many continents are there?", &["7", "5", "6", "8"], "GK", 1),
        quiz(5, "Which organ pumps blood?", &["Heart", "Liver", "Kidney", "Lungs"], "Science", 1),
        quiz(
            6,
            "What is the past tense of 'go'?",
            &["went", "goes", "gone", "going"],
            "English",
            2,
        ),
        quiz(7, "What is 15 x 4?", &["60", "50", "70", "55"], "Math", 2),
        quiz(
            8,
            "Which is the longest river in India?",
            &["Ganga", "Yamuna", "Godavari", "Krishna"],
            "GK",
            2,
        ),
        quiz(9, "What is 1/4 of 100?", &["25", "50", "75", "10"], "Math", 2),
        quiz(
            10,
            "Which planet is known as the red planet?",
            &["Mars", "Venus", "Jupiter", "Mercury"],
            "Science",
            3,
        ),
        quiz(
            11,
            "What is the plural of 'mouse'?",
            &["mice", "mouses", "mousees", "mouse"],
            "English",
            3,
        ),
        quiz(12, "What is 144 / 12?", &["12", "10", "14", "16"], "Math", 3),
    ]
}

fn error_questions() -> Vec<ErrorQuestion> {
    vec![
        error(
            1,
            "She go to school daily.",
            "She goes to school daily.",
            "verb",
            "Use 'goes' with third person singular (she, he, it).",
        ),
        error(
            2,
            "The childrens are playing.",
            "The children are playing.",
            "plural",
            "'Children' is already plural, no need for 's'.",
        ),
        error(
            3,
            "I has a book.",
            "I have a book.",
            "verb",
            "Use 'have' with I, you, we, they.",
        ),
        error(
            4,
            "They was happy.",
            "They were happy.",
            "verb",
            "Use 'were' with plural subjects.",
        ),
        error(
            5,
            "5 + 3 = 7",
            "5 + 3 = 8",
            "math",
            "5 plus 3 equals 8, not 7.",
        ),
        error(
            6,
            "Plants make food at night.",
            "Plants make food during daytime.",
            "science",
            "Photosynthesis needs sunlight, so it happens during the day.",
        ),
        error(
            7,
            "The sun rises in west.",
            "The sun rises in the east.",
            "general",
            "The sun rises in the east and sets in the west.",
        ),
        error(
            8,
            "She is more taller than me.",
            "She is taller than me.",
            "comparison",
            "Don't use 'more' with '-er' comparatives.",
        ),
        error(
            9,
            "I seen him yesterday.",
            "I saw him yesterday.",
            "verb",
            "Use 'saw' for the past tense of 'see'.",
        ),
        error(
            10,
            "He can runs fast.",
            "He can run fast.",
            "verb",
            "After 'can', use the base form of the verb.",
        ),
    ]
}

fn meaning_pairs() -> Vec<MeaningPair> {
    vec![
        meaning(1, "Happy", "Feeling joy", &["Feeling sad", "Feeling angry", "Feeling tired"]),
        meaning(2, "Beautiful", "Very pretty", &["Very ugly", "Very big", "Very small"]),
        meaning(3, "Strong", "Having power", &["Being weak", "Being slow", "Being fast"]),
        meaning(4, "Wise", "Having good judgment", &["Being foolish", "Being young", "Being old"]),
        meaning(5, "Brave", "Showing courage", &["Showing fear", "Showing anger", "Showing joy"]),
        meaning(6, "Kind", "Being helpful and caring", &["Being mean", "Being lazy", "Being busy"]),
        meaning(7, "Honest", "Telling the truth", &["Telling lies", "Being quiet", "Being loud"]),
        meaning(
            8,
            "Patient",
            "Able to wait calmly",
            &["Always in hurry", "Always sleeping", "Always eating"],
        ),
        meaning(9, "Generous", "Willing to give", &["Being selfish", "Being hungry", "Being thirsty"]),
        meaning(10, "Curious", "Wanting to know", &["Not interested", "Always sleeping", "Always playing"]),
    ]
}

fn visual_words() -> Vec<VisualWord> {
    vec![
        visual(1, "farmer field", "Farmer", &["Farmer", "Teacher", "Doctor", "Driver"], 1),
        visual(2, "village market", "Market", &["Market", "School", "Hospital", "Temple"], 1),
        visual(3, "children playing", "Playing", &["Playing", "Studying", "Sleeping", "Eating"], 1),
        visual(4, "cow grazing", "Cow", &["Cow", "Buffalo", "Goat", "Horse"], 1),
        visual(5, "sunset landscape", "Sunset", &["Sunset", "Sunrise", "Night", "Moon"], 1),
        visual(6, "river flowing", "River", &["River", "Lake", "Ocean", "Pond"], 1),
        visual(7, "tree nature", "Tree", &["Tree", "Plant", "Flower", "Grass"], 1),
        visual(8, "school classroom", "Classroom", &["Classroom", "Library", "Office", "Home"], 2),
        visual(9, "family dinner", "Family", &["Family", "Friends", "Neighbors", "Strangers"], 2),
        visual(10, "rain clouds", "Rain", &["Rain", "Snow", "Storm", "Wind"], 2),
    ]
}

//! Static UI translation tables (English, Hindi).
//!
//! A lookup table, not a translation engine: every string the shell needs,
//! per language, resolved once per request from the language cookie.

/// Language cookie name (not HttpOnly, toggled from the settings page)
pub const LANG_COOKIE_NAME: &str = "verbora_lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
  #[default]
  En,
  Hi,
}

impl Lang {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "en" => Some(Self::En),
      "hi" => Some(Self::Hi),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::En => "en",
      Self::Hi => "hi",
    }
  }
}

pub struct NavStrings {
  pub home: &'static str,
  pub games: &'static str,
  pub progress: &'static str,
  pub teacher: &'static str,
  pub settings: &'static str,
  pub logout: &'static str,
}

pub struct HomeStrings {
  pub welcome: &'static str,
  pub subtitle: &'static str,
  pub daily_streak: &'static str,
  pub days: &'static str,
  pub start_learning: &'static str,
}

pub struct CommonStrings {
  pub level: &'static str,
  pub score: &'static str,
  pub start: &'static str,
  pub next: &'static str,
  pub submit: &'static str,
  pub correct: &'static str,
  pub incorrect: &'static str,
  pub close_enough: &'static str,
  pub almost: &'static str,
  pub try_again: &'static str,
  pub completed: &'static str,
  pub locked: &'static str,
  pub play: &'static str,
  pub back: &'static str,
}

pub struct Translations {
  pub nav: NavStrings,
  pub home: HomeStrings,
  pub common: CommonStrings,
}

static EN: Translations = Translations {
  nav: NavStrings {
    home: "Home",
    games: "Games",
    progress: "Progress",
    teacher: "Teacher",
    settings: "Settings",
    logout: "Log out",
  },
  home: HomeStrings {
    welcome: "Welcome Back!",
    subtitle: "Continue your learning journey",
    daily_streak: "Daily Streak",
    days: "days",
    start_learning: "Start Learning",
  },
  common: CommonStrings {
    level: "Level",
    score: "Score",
    start: "Start",
    next: "Next",
    submit: "Submit",
    correct: "Correct!",
    incorrect: "Not quite. Give it another shot!",
    close_enough: "You're very close! That's an acceptable answer.",
    almost: "Almost! Try a synonym or check your spelling.",
    try_again: "Try Again",
    completed: "Completed",
    locked: "Locked",
    play: "Play",
    back: "Back",
  },
};

static HI: Translations = Translations {
  nav: NavStrings {
    home: "होम",
    games: "खेल",
    progress: "प्रगति",
    teacher: "शिक्षक",
    settings: "सेटिंग्स",
    logout: "लॉग आउट",
  },
  home: HomeStrings {
    welcome: "वापसी पर स्वागत है!",
    subtitle: "अपनी सीखने की यात्रा जारी रखें",
    daily_streak: "दैनिक स्ट्रीक",
    days: "दिन",
    start_learning: "सीखना शुरू करें",
  },
  common: CommonStrings {
    level: "स्तर",
    score: "अंक",
    start: "शुरू करें",
    next: "आगे",
    submit: "जमा करें",
    correct: "सही!",
    incorrect: "सही नहीं। फिर से कोशिश करें!",
    close_enough: "बहुत करीब! यह उत्तर स्वीकार्य है।",
    almost: "लगभग! कोई पर्यायवाची आज़माएँ या वर्तनी जाँचें।",
    try_again: "फिर कोशिश करें",
    completed: "पूर्ण",
    locked: "बंद",
    play: "खेलें",
    back: "वापस",
  },
};

/// Resolve the table for a language.
pub fn translations(lang: Lang) -> &'static Translations {
  match lang {
    Lang::En => &EN,
    Lang::Hi => &HI,
  }
}

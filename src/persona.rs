const IT_ENGINEER_INSTRUCTION: &str = "あなたはプログラミング、システム設計、ネットワーク、セキュリティなど、IT技術に関する深い専門知識を持つITエンジニアです。ユーザーの質問に対して、技術的な視点から正確で実用的な情報を提供してください。";
const COUNSELOR_INSTRUCTION: &str = "あなたは人間の感情、行動、心の健康に関する専門知識を持つ心理カウンセラーです。ユーザーの悩みや質問に対して、共感的な視点からアドバイスや考察を優しく提供してください。";
const TRAVEL_CONCIERGE_INSTRUCTION: &str = "あなたは国内外の旅行先に関する豊富な知識を持つ旅行コンシェルジュです。ユーザーの希望や予算に応じて、最適な旅行プランの提案、おすすめのスポット、現地の文化情報などを提供し、思い出に残る旅の計画をサポートしてください。";
const GENERAL_ASSISTANT_INSTRUCTION: &str =
    "あなたは親切なAIアシスタントです。ユーザーの質問に丁寧にお答えします。";

/// Behavioral frame handed to the model as its system instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Persona {
    #[default]
    ItEngineer,
    PsychologicalCounselor,
    TravelConcierge,
    GeneralAssistant,
}

impl Persona {
    /// Selector order shown to the user.
    pub const ALL: [Persona; 4] = [
        Persona::ItEngineer,
        Persona::PsychologicalCounselor,
        Persona::TravelConcierge,
        Persona::GeneralAssistant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ItEngineer => "ITエンジニア",
            Self::PsychologicalCounselor => "心理カウンセラー",
            Self::TravelConcierge => "旅行コンシェルジュ",
            Self::GeneralAssistant => "一般的なアシスタント",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::ItEngineer => "it-engineer",
            Self::PsychologicalCounselor => "counselor",
            Self::TravelConcierge => "travel-concierge",
            Self::GeneralAssistant => "general",
        }
    }

    /// Exact label match only. Any other string, padded or differently
    /// cased ones included, selects the general assistant.
    pub fn from_label(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|persona| raw == persona.label())
            .unwrap_or(Self::GeneralAssistant)
    }

    /// Command-line form: also accepts the ASCII slug, ignoring case and
    /// surrounding whitespace.
    pub fn from_cli_arg(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|persona| {
                trimmed == persona.label() || trimmed.eq_ignore_ascii_case(persona.slug())
            })
            .unwrap_or(Self::GeneralAssistant)
    }

    pub fn instruction(self) -> &'static str {
        resolve(self)
    }

    pub fn next(self) -> Self {
        let index = self.position();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = self.position();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        match self {
            Self::ItEngineer => 0,
            Self::PsychologicalCounselor => 1,
            Self::TravelConcierge => 2,
            Self::GeneralAssistant => 3,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub fn resolve(persona: Persona) -> &'static str {
    match persona {
        Persona::ItEngineer => IT_ENGINEER_INSTRUCTION,
        Persona::PsychologicalCounselor => COUNSELOR_INSTRUCTION,
        Persona::TravelConcierge => TRAVEL_CONCIERGE_INSTRUCTION,
        Persona::GeneralAssistant => GENERAL_ASSISTANT_INSTRUCTION,
    }
}

pub fn resolve_label(raw: &str) -> &'static str {
    resolve(Persona::from_label(raw))
}

//! Section labels per language.

use promptc_ir::Language;

pub struct Labels {
    pub goals: &'static str,
    pub tasks: &'static str,
    pub inputs: &'static str,
    pub constraints: &'static str,
    pub steps: &'static str,
    pub examples: &'static str,
    pub comparison: &'static str,
    pub questions: &'static str,
    pub output_format: &'static str,
    pub length: &'static str,
    pub style: &'static str,
    pub tone: &'static str,
    pub avoid: &'static str,
    pub tools: &'static str,
    /// Line the plan surface opens with.
    pub plan_intro: &'static str,
    /// Headings of the expanded surface: system, user, plan.
    pub parts: [&'static str; 3],
}

static EN: Labels = Labels {
    goals: "Goals",
    tasks: "Tasks",
    inputs: "Inputs",
    constraints: "Constraints",
    steps: "Steps",
    examples: "Examples",
    comparison: "Compare",
    questions: "Follow-up questions",
    output_format: "Output format",
    length: "Length",
    style: "Style",
    tone: "Tone",
    avoid: "Avoid",
    tools: "Tools",
    plan_intro: "Work through the request in this order.",
    parts: ["System", "User", "Plan"],
};

static TR: Labels = Labels {
    goals: "Hedefler",
    tasks: "Görevler",
    inputs: "Girdiler",
    constraints: "Kısıtlar",
    steps: "Adımlar",
    examples: "Örnekler",
    comparison: "Karşılaştır",
    questions: "Netleştirme soruları",
    output_format: "Çıktı biçimi",
    length: "Uzunluk",
    style: "Üslup",
    tone: "Ton",
    avoid: "Kaçın",
    tools: "Araçlar",
    plan_intro: "İsteği bu sırayla ele al.",
    parts: ["Sistem", "Kullanıcı", "Plan"],
};

static ES: Labels = Labels {
    goals: "Objetivos",
    tasks: "Tareas",
    inputs: "Entradas",
    constraints: "Restricciones",
    steps: "Pasos",
    examples: "Ejemplos",
    comparison: "Comparar",
    questions: "Preguntas de seguimiento",
    output_format: "Formato de salida",
    length: "Longitud",
    style: "Estilo",
    tone: "Tono",
    avoid: "Evitar",
    tools: "Herramientas",
    plan_intro: "Aborda la solicitud en este orden.",
    parts: ["Sistema", "Usuario", "Plan"],
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::Tr => &TR,
        Language::Es => &ES,
    }
}

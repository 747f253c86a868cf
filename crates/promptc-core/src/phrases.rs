//! Localized texts for constraints, steps, examples, roles and questions.
//!
//! Templates use `{n}`, `{topic}`, `{term}`, `{level}`, `{duration}`,
//! `{domain}`, `{terms}` and `{categories}` placeholders.

use promptc_ir::{AmbiguityCategory, Language, OutputFormat, Persona};

pub struct Phrases {
    pub privacy: &'static str,
    pub disclaimer: &'static str,
    pub recency: &'static str,
    pub domain: &'static str,
    pub ambiguity: &'static str,
    pub code_comments: &'static str,

    pub format_markdown: &'static str,
    pub format_json: &'static str,
    pub format_yaml: &'static str,
    pub format_table: &'static str,
    pub format_text: &'static str,

    pub teach_flow: &'static str,
    pub teach_analogy: &'static str,
    pub teach_sources: &'static str,
    pub teach_time: &'static str,
    pub teach_level: &'static str,
    /// introduce, demonstrate, exercise, summarize
    pub teach_steps: [&'static str; 4],
    pub teach_quiz: &'static str,
    pub topic_fallback: &'static str,
    /// beginner, intermediate, advanced
    pub levels: [&'static str; 3],
    /// (one, many) for minutes, then hours
    pub minutes: (&'static str, &'static str),
    pub hours: (&'static str, &'static str),

    pub summary: &'static str,
    pub summary_bullets: &'static str,
    pub comparison: &'static str,
    pub variants: &'static str,

    pub debug_runnable: &'static str,
    pub debug_repro: &'static str,
    /// reproduce, isolate, fix, verify
    pub debug_steps: [&'static str; 4],

    /// assistant, teacher, researcher, coach, mentor, developer
    pub roles: [&'static str; 6],
    pub instructor_note: &'static str,

    /// performance, scale, security, reliability, quality, scope
    pub questions: [&'static str; 6],
}

static EN: Phrases = Phrases {
    privacy: "Redact personal data such as emails, phone numbers, card numbers and IBANs; never repeat it verbatim.",
    disclaimer: "State that this is general information and not professional {categories} advice; recommend consulting a qualified professional.",
    recency: "Prefer up-to-date information and state the date of any time-sensitive facts.",
    domain: "Use accurate {domain} terminology.",
    ambiguity: "Clarify or state your assumptions for ambiguous terms: {terms}.",
    code_comments: "Include inline comments in code examples.",

    format_markdown: "Format the response as Markdown.",
    format_json: "Return the response as valid JSON.",
    format_yaml: "Return the response as valid YAML.",
    format_table: "Present the response as a table.",
    format_text: "Respond in plain text without Markdown.",

    teach_flow: "Follow a progressive pedagogical flow from intuition to worked examples to practice.",
    teach_analogy: "Use at least one concrete analogy to explain the core idea.",
    teach_sources: "Point to reputable sources for further study.",
    teach_time: "Keep the lesson within {duration}.",
    teach_level: "Pitch explanations at a {level} level.",
    teach_steps: [
        "Introduce {topic} and why it matters",
        "Demonstrate {topic} with a worked example",
        "Give a short exercise to practice {topic}",
        "Summarize the key points about {topic}",
    ],
    teach_quiz: "Mini quiz: three short questions to check understanding of {topic}.",
    topic_fallback: "the concept",
    levels: ["beginner", "intermediate", "advanced"],
    minutes: ("minute", "minutes"),
    hours: ("hour", "hours"),

    summary: "Provide a concise summary.",
    summary_bullets: "Maximum {n} bullet points.",
    comparison: "Present a structured comparison (table) across the key criteria.",
    variants: "Generate {n} distinct variants.",

    debug_runnable: "Provide a minimal runnable example that demonstrates the fix.",
    debug_repro: "List the exact steps to reproduce the problem before fixing it.",
    debug_steps: [
        "Reproduce the problem with a minimal example",
        "Isolate the root cause",
        "Apply the fix",
        "Verify the fix and check for regressions",
    ],

    roles: [
        "You are a helpful assistant.",
        "You are a patient teacher.",
        "You are a meticulous researcher.",
        "You are a supportive coach.",
        "You are an experienced mentor.",
        "You are a senior software developer.",
    ],
    instructor_note: "Act as an instructor for this request.",

    questions: [
        "Which performance metric and target does '{term}' refer to?",
        "What load or growth should '{term}' support?",
        "Which threats or compliance requirements should '{term}' cover?",
        "What availability or failure tolerance does '{term}' require?",
        "What criteria define '{term}' for this request?",
        "What exactly is in scope for '{term}'?",
    ],
};

static TR: Phrases = Phrases {
    privacy: "E-posta, telefon, kart numarası ve IBAN gibi kişisel verileri maskele; asla aynen tekrar etme.",
    disclaimer: "Bunun genel bilgi olduğunu ve profesyonel {categories} tavsiyesi olmadığını belirt; uzmana danışmayı öner.",
    recency: "Güncel bilgileri tercih et ve zamana bağlı bilgilerin tarihini belirt.",
    domain: "Doğru {domain} terminolojisi kullan.",
    ambiguity: "Belirsiz terimler için varsayımlarını netleştir: {terms}.",
    code_comments: "Kod örneklerine satır içi yorumlar ekle.",

    format_markdown: "Yanıtı Markdown olarak biçimlendir.",
    format_json: "Yanıtı geçerli JSON olarak döndür.",
    format_yaml: "Yanıtı geçerli YAML olarak döndür.",
    format_table: "Yanıtı tablo olarak sun.",
    format_text: "Markdown kullanmadan düz metin olarak yanıt ver.",

    teach_flow: "Sezgiden çözümlü örneklere ve alıştırmaya ilerleyen aşamalı bir öğretim akışı izle.",
    teach_analogy: "Ana fikri açıklamak için en az bir somut benzetme kullan.",
    teach_sources: "İleri çalışma için güvenilir kaynaklar göster.",
    teach_time: "Dersi {duration} içinde tut.",
    teach_level: "Açıklamaları {level} seviyesine göre ayarla.",
    teach_steps: [
        "{topic} konusunu ve önemini tanıt",
        "{topic} konusunu çözümlü bir örnekle göster",
        "{topic} için kısa bir alıştırma ver",
        "{topic} hakkındaki ana noktaları özetle",
    ],
    teach_quiz: "Mini test: {topic} konusunu pekiştirmek için üç kısa soru.",
    topic_fallback: "konu",
    levels: ["başlangıç", "orta", "ileri"],
    minutes: ("dakika", "dakika"),
    hours: ("saat", "saat"),

    summary: "Kısa ve öz bir özet sun.",
    summary_bullets: "En fazla {n} madde kullan.",
    comparison: "Temel kriterlere göre yapılandırılmış bir karşılaştırma (tablo) sun.",
    variants: "{n} farklı varyasyon üret.",

    debug_runnable: "Düzeltmeyi gösteren minimal, çalıştırılabilir bir örnek ver.",
    debug_repro: "Düzeltmeden önce sorunu yeniden üretme adımlarını listele.",
    debug_steps: [
        "Sorunu minimal bir örnekle yeniden üret",
        "Kök nedeni izole et",
        "Düzeltmeyi uygula",
        "Düzeltmeyi doğrula ve gerilemeleri kontrol et",
    ],

    roles: [
        "Sen yardımsever bir asistansın.",
        "Sen sabırlı bir öğretmensin.",
        "Sen titiz bir araştırmacısın.",
        "Sen destekleyici bir koçsun.",
        "Sen deneyimli bir mentorsun.",
        "Sen kıdemli bir yazılım geliştiricisisin.",
    ],
    instructor_note: "Bu istekte eğitmen olarak davran.",

    questions: [
        "'{term}' hangi performans metriğini ve hedefini ifade ediyor?",
        "'{term}' hangi yükü veya büyümeyi desteklemeli?",
        "'{term}' hangi tehditleri veya uyumluluk gereksinimlerini kapsamalı?",
        "'{term}' hangi erişilebilirlik veya hata toleransını gerektiriyor?",
        "Bu istekte '{term}' hangi kriterlerle tanımlanıyor?",
        "'{term}' kapsamına tam olarak neler giriyor?",
    ],
};

static ES: Phrases = Phrases {
    privacy: "Oculta los datos personales como correos, teléfonos, números de tarjeta e IBAN; nunca los repitas literalmente.",
    disclaimer: "Indica que esto es información general y no asesoramiento profesional {categories}; recomienda consultar a un profesional cualificado.",
    recency: "Prefiere información actualizada e indica la fecha de los datos sensibles al tiempo.",
    domain: "Usa terminología precisa de {domain}.",
    ambiguity: "Aclara o explicita tus supuestos para los términos ambiguos: {terms}.",
    code_comments: "Incluye comentarios en línea en los ejemplos de código.",

    format_markdown: "Da formato a la respuesta en Markdown.",
    format_json: "Devuelve la respuesta como JSON válido.",
    format_yaml: "Devuelve la respuesta como YAML válido.",
    format_table: "Presenta la respuesta como una tabla.",
    format_text: "Responde en texto plano sin Markdown.",

    teach_flow: "Sigue un flujo pedagógico progresivo de la intuición a ejemplos resueltos y a la práctica.",
    teach_analogy: "Usa al menos una analogía concreta para explicar la idea central.",
    teach_sources: "Señala fuentes reconocidas para profundizar.",
    teach_time: "Mantén la lección dentro de {duration}.",
    teach_level: "Ajusta las explicaciones a un nivel {level}.",
    teach_steps: [
        "Presenta {topic} y por qué es importante",
        "Demuestra {topic} con un ejemplo resuelto",
        "Propón un ejercicio breve para practicar {topic}",
        "Resume los puntos clave sobre {topic}",
    ],
    teach_quiz: "Mini cuestionario: tres preguntas breves para comprobar la comprensión de {topic}.",
    topic_fallback: "el concepto",
    levels: ["principiante", "intermedio", "avanzado"],
    minutes: ("minuto", "minutos"),
    hours: ("hora", "horas"),

    summary: "Proporciona un resumen conciso.",
    summary_bullets: "Máximo {n} viñetas.",
    comparison: "Presenta una comparación estructurada (tabla) según los criterios clave.",
    variants: "Genera {n} variantes distintas.",

    debug_runnable: "Proporciona un ejemplo mínimo ejecutable que demuestre la corrección.",
    debug_repro: "Enumera los pasos exactos para reproducir el problema antes de corregirlo.",
    debug_steps: [
        "Reproduce el problema con un ejemplo mínimo",
        "Aísla la causa raíz",
        "Aplica la corrección",
        "Verifica la corrección y comprueba regresiones",
    ],

    roles: [
        "Eres un asistente servicial.",
        "Eres un profesor paciente.",
        "Eres un investigador meticuloso.",
        "Eres un coach que brinda apoyo.",
        "Eres un mentor con experiencia.",
        "Eres un desarrollador de software sénior.",
    ],
    instructor_note: "En esta solicitud actúa como instructor.",

    questions: [
        "¿A qué métrica y objetivo de rendimiento se refiere '{term}'?",
        "¿Qué carga o crecimiento debe soportar '{term}'?",
        "¿Qué amenazas o requisitos de cumplimiento debe cubrir '{term}'?",
        "¿Qué disponibilidad o tolerancia a fallos requiere '{term}'?",
        "¿Qué criterios definen '{term}' en esta solicitud?",
        "¿Qué entra exactamente en el alcance de '{term}'?",
    ],
};

pub fn phrases(language: Language) -> &'static Phrases {
    match language {
        Language::En => &EN,
        Language::Tr => &TR,
        Language::Es => &ES,
    }
}

impl Phrases {
    pub fn role(&self, persona: Persona) -> &'static str {
        let index = Persona::ALL.iter().position(|p| *p == persona).unwrap_or(0);
        self.roles[index]
    }

    pub fn question(&self, category: AmbiguityCategory, term: &str) -> String {
        let index = AmbiguityCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.questions[index].replace("{term}", term)
    }

    pub fn format(&self, format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Markdown => self.format_markdown,
            OutputFormat::Json => self.format_json,
            OutputFormat::Yaml => self.format_yaml,
            OutputFormat::Table => self.format_table,
            OutputFormat::Text => self.format_text,
        }
    }

    /// `10` minutes -> "10 minutes", `1` hour -> "1 hour".
    pub fn duration(&self, value: f64, hours: bool) -> String {
        let (one, many) = if hours { self.hours } else { self.minutes };
        let unit = if value == 1.0 { one } else { many };
        format!("{} {unit}", format_number(value))
    }
}

/// Integral values without a fractional part, others as written by `f64`'s `Display`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Fill one placeholder.
pub fn fill(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{key}}}"), value)
}

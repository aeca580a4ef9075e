//! Pattern sets, keyword boost tables, and scoring constants.
//!
//! All matching data used by the classifier lives here as one immutable
//! [`TriageTables`] value, built once at startup and injected into
//! [`TriageRouter`](crate::triage::TriageRouter). Tests substitute their own
//! tables instead of mutating globals.
//!
//! Every weight and threshold is a named constant. The values are tuned for
//! behavioral compatibility with the clinic's existing triage rules; treat
//! them as adjustable parameters, not invariants.

use regex::Regex;

/// Emergency decisions fire when the emergency score exceeds this.
pub const EMERGENCY_THRESHOLD: f64 = 0.3;

/// Flat boost per critical word found literally in the text.
pub const CRITICAL_WORD_BOOST: f64 = 0.4;

/// Boost when a distress phrase ("passando mal" / "muito mal") appears.
pub const DISTRESS_PHRASE_BOOST: f64 = 0.3;

/// Boost per core scheduling term.
pub const SCHEDULING_TERM_BOOST: f64 = 0.3;

/// Boost per confirmation term.
pub const CONFIRMATION_TERM_BOOST: f64 = 0.25;

/// Boost per reschedule/cancel term.
pub const RESCHEDULE_TERM_BOOST: f64 = 0.3;

/// Boost per question word in general-medical scoring.
pub const QUESTION_WORD_BOOST: f64 = 0.1;

/// Boost per greeting in general-medical scoring.
pub const GREETING_BOOST: f64 = 0.08;

/// Boost per medical-information term.
pub const MEDICAL_TERM_BOOST: f64 = 0.12;

/// Boost per clinic-information term.
pub const CLINIC_TERM_BOOST: f64 = 0.1;

/// Scheduling wins the tie-break only above this score.
pub const SCHEDULING_THRESHOLD: f64 = 0.5;

/// Minimum confidence reported for the fallback medical-consultation route.
pub const MEDICAL_CONFIDENCE_FLOOR: f64 = 0.7;

/// A named, ordered collection of regex patterns.
///
/// Each entry carries a stable identifier that ends up in
/// [`RoutingDecision::matched_patterns`](crate::triage::RoutingDecision) as
/// the audit trail of what fired.
pub struct PatternSet {
    entries: Vec<(&'static str, Regex)>,
}

impl PatternSet {
    fn new(entries: &[(&'static str, &str)]) -> Self {
        let entries = entries
            .iter()
            .map(|(id, pattern)| {
                let regex = Regex::new(pattern)
                    .unwrap_or_else(|e| panic!("invalid triage pattern '{id}': {e}"));
                (*id, regex)
            })
            .collect();
        Self { entries }
    }

    /// Identifiers of all patterns matching `text`, in table order.
    pub fn matches(&self, text: &str) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of patterns in the set (the density denominator).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fraction of patterns in this set that match `text`.
    pub fn density(&self, text: &str) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.matches(text).len() as f64 / self.entries.len() as f64
    }
}

/// Keywords that each contribute a fixed additive boost when found as a
/// literal substring of the normalized text.
pub struct BoostTable {
    keywords: Vec<&'static str>,
    weight: f64,
}

impl BoostTable {
    fn new(keywords: &[&'static str], weight: f64) -> Self {
        Self {
            keywords: keywords.to_vec(),
            weight,
        }
    }

    /// Sum of boosts for every keyword contained in `text`.
    pub fn score(&self, text: &str) -> f64 {
        self.keywords
            .iter()
            .filter(|kw| text.contains(*kw))
            .count() as f64
            * self.weight
    }

    /// Whether any keyword is contained in `text`.
    pub fn any_match(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw))
    }
}

/// Immutable matching configuration for the whole classifier.
///
/// Constructed once at process start (or per test) and shared read-only, so
/// classification is safe to run concurrently without locking.
pub struct TriageTables {
    pub emergency_patterns: PatternSet,
    pub scheduling_patterns: PatternSet,
    pub medical_patterns: PatternSet,

    pub critical_words: BoostTable,
    pub distress_phrases: BoostTable,

    pub scheduling_terms: BoostTable,
    pub confirmation_terms: BoostTable,
    pub reschedule_terms: BoostTable,

    pub question_words: BoostTable,
    pub greetings: BoostTable,
    pub medical_terms: BoostTable,
    pub clinic_terms: BoostTable,

    /// Cue lists for the scheduling sub-workflow resolver, checked in
    /// priority order: confirmation, reschedule, booking.
    pub confirmation_cues: Vec<&'static str>,
    pub reschedule_cues: Vec<&'static str>,
    pub booking_cues: Vec<&'static str>,
}

impl TriageTables {
    /// Production tables for Brazilian Portuguese clinic traffic.
    pub fn default_pt_br() -> Self {
        Self {
            emergency_patterns: PatternSet::new(&[
                ("emergency_terms", r"\b(emergência|emergencia|socorro|urgente)\b"),
                ("acute_event", r"\b(dor no peito|infarto|derrame|avc)\b"),
                ("bleeding_fainting", r"\b(sangramento|hemorragia|desmaio)\b"),
                ("breathing", r"\b(falta de ar|respirar|ofegante)\b"),
                ("feeling_unwell", r"\b(passando mal|muito mal|grave)\b"),
                ("chest_pain", r"\b(dor.*peito|peito.*dor)\b"),
            ]),
            scheduling_patterns: PatternSet::new(&[
                ("booking_verbs", r"\b(agendar|consulta|marcar)\b"),
                ("availability", r"\b(horário|horario|disponível|disponivel)\b"),
                ("doctor_titles", r"\b(médico|medico|doutor|doutora|dr|dra)\b"),
                ("confirmation_verbs", r"\b(confirmar|confirmação|confirmacao)\b"),
                ("affirmatives", r"\b(sim|confirmo|ok|tudo bem)\b"),
                ("reschedule_verbs", r"\b(reagendar|remarcar|mudar|trocar)\b"),
                ("cancel_verbs", r"\b(cancelar|desmarcar)\b"),
            ]),
            medical_patterns: PatternSet::new(&[
                ("question_words", r"\b(como|quando|onde|porque|por que|qual)\b"),
                ("info_requests", r"\b(informação|informacao|dúvida|duvida|ajuda)\b"),
                ("greetings", r"\b(oi|olá|ola|bom dia|boa tarde|boa noite)\b"),
                ("medical_info", r"\b(sintoma|tratamento|medicamento|remédio|remedio)\b"),
                ("exams", r"\b(exame|resultado|procedimento)\b"),
                ("care_guidance", r"\b(orientação|orientacao|cuidados|preparo)\b"),
                ("common_conditions", r"\b(gripe|resfriado|covid|febre|tosse|dor)\b"),
                ("chronic_conditions", r"\b(diabetes|pressão|colesterol|coração|cardiaco)\b"),
                ("clinic_logistics", r"\b(funcionamento|endereço|endereco|localização|localizacao)\b"),
                ("coverage", r"\b(especialidades|convênio|convenio|plano)\b"),
            ]),

            critical_words: BoostTable::new(
                &[
                    "socorro",
                    "emergência",
                    "emergencia",
                    "infarto",
                    "derrame",
                    "sangramento",
                    "urgente",
                ],
                CRITICAL_WORD_BOOST,
            ),
            distress_phrases: BoostTable::new(
                &["passando mal", "muito mal"],
                DISTRESS_PHRASE_BOOST,
            ),

            scheduling_terms: BoostTable::new(
                &["agendar", "marcar", "consulta", "médico", "horário", "exame"],
                SCHEDULING_TERM_BOOST,
            ),
            confirmation_terms: BoostTable::new(
                &["confirmar", "sim", "ok", "confirmação"],
                CONFIRMATION_TERM_BOOST,
            ),
            reschedule_terms: BoostTable::new(
                &["reagendar", "remarcar", "cancelar", "mudar", "trocar"],
                RESCHEDULE_TERM_BOOST,
            ),

            question_words: BoostTable::new(
                &["como", "quando", "onde", "porque", "qual", "que", "quem"],
                QUESTION_WORD_BOOST,
            ),
            greetings: BoostTable::new(
                &["oi", "olá", "bom dia", "boa tarde", "boa noite", "hello"],
                GREETING_BOOST,
            ),
            medical_terms: BoostTable::new(
                &["sintoma", "tratamento", "medicamento", "exame", "orientação"],
                MEDICAL_TERM_BOOST,
            ),
            clinic_terms: BoostTable::new(
                &["funcionamento", "endereço", "especialidades", "convênio"],
                CLINIC_TERM_BOOST,
            ),

            confirmation_cues: vec!["confirmar", "confirmação", "sim", "ok"],
            reschedule_cues: vec!["reagendar", "remarcar", "mudar", "trocar", "cancelar"],
            booking_cues: vec!["agendar", "marcar", "consulta", "médico", "horário"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_pattern_counts() {
        let tables = TriageTables::default_pt_br();
        assert_eq!(tables.emergency_patterns.len(), 6);
        assert_eq!(tables.scheduling_patterns.len(), 7);
        assert_eq!(tables.medical_patterns.len(), 10);
    }

    #[test]
    fn pattern_set_reports_matches_in_order() {
        let tables = TriageTables::default_pt_br();
        let matched = tables
            .emergency_patterns
            .matches("socorro, muita falta de ar");
        assert_eq!(matched, vec!["emergency_terms", "breathing"]);
    }

    #[test]
    fn density_is_fraction_of_set() {
        let tables = TriageTables::default_pt_br();
        let density = tables.scheduling_patterns.density("quero agendar");
        assert!((density - 1.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn boost_table_sums_per_keyword() {
        let tables = TriageTables::default_pt_br();
        // "agendar" and "consulta" both present.
        let score = tables.scheduling_terms.score("agendar uma consulta");
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn boost_table_uses_substring_containment() {
        let tables = TriageTables::default_pt_br();
        // "que" appears inside "aquele" - containment is intentional.
        assert!(tables.question_words.any_match("aquele dia"));
    }

    #[test]
    fn chest_pain_pattern_matches_flexible_order() {
        let tables = TriageTables::default_pt_br();
        let matched = tables
            .emergency_patterns
            .matches("sinto dor aqui no peito agora");
        assert!(matched.contains(&"chest_pain"));
    }
}

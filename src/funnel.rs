use crate::catalog::format_mt;
use crate::payment::valid_phone;
use serde::{Deserialize, Serialize};

/// Mandatory functional assessment + bioimpedance, charged once.
pub const ASSESSMENT_FEE: u64 = 700;
pub const HYBRID_SURCHARGE: u64 = 1500;
pub const FOCUS_SURCHARGE: u64 = 1000;
pub const SUPPORT_SURCHARGE: u64 = 800;

pub const TOTAL_STEPS: u8 = 9;
pub const SUMMARY_STEP: u8 = 7;
pub const CONTACT_STEP: u8 = 8;
pub const WHATSAPP_STEP: u8 = 9;

/// Destination for the final hand-off message.
pub const WHATSAPP_NUMBER: &str = "258842391741";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Reabilitacao,
    Idosos,
    Atletas,
}

impl Objective {
    /// Parses the `objetivo` query parameter used by campaign links.
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "reabilitacao" => Some(Self::Reabilitacao),
            "idosos" => Some(Self::Idosos),
            "atletas" => Some(Self::Atletas),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reabilitacao => "Reabilitação / Dor",
            Self::Idosos => "Saúde e Autonomia (Idosos)",
            Self::Atletas => "Performance Esportiva (Atletas)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "1x")]
    OncePerWeek,
    #[serde(rename = "2x")]
    TwicePerWeek,
    #[serde(rename = "3x")]
    ThricePerWeek,
    #[serde(rename = "5x")]
    FiveTimesPerWeek,
}

impl Frequency {
    pub fn monthly_price(self) -> u64 {
        match self {
            Self::OncePerWeek => 4000,
            Self::TwicePerWeek => 7000,
            Self::ThricePerWeek => 9000,
            Self::FiveTimesPerWeek => 12000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OncePerWeek => "1x por semana",
            Self::TwicePerWeek => "2x por semana",
            Self::ThricePerWeek => "3x por semana",
            Self::FiveTimesPerWeek => "5x por semana",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    Presencial,
    Hibrido,
}

impl DeliveryMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Presencial => "Presencial Domiciliar",
            Self::Hibrido => "Híbrido (Presencial + Vídeos)",
        }
    }
}

/// The funnel wizard's whole state. It lives in the page and travels with
/// every event request; the server never stores it, so a reload starts over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelState {
    pub step: u8,
    pub objective: Option<Objective>,
    pub frequency: Option<Frequency>,
    pub delivery: Option<DeliveryMode>,
    pub specific_focus: bool,
    pub extended_support: bool,
    pub name: String,
    pub whatsapp: String,
    pub bairro: String,
}

impl Default for FunnelState {
    fn default() -> Self {
        Self {
            step: 1,
            objective: None,
            frequency: None,
            delivery: None,
            specific_focus: false,
            extended_support: false,
            name: String::new(),
            whatsapp: String::new(),
            bairro: String::new(),
        }
    }
}

/// A client-side selection or navigation action applied to a [`FunnelState`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FunnelEvent {
    SelectObjective { objective: Objective },
    SelectFrequency { frequency: Frequency },
    SelectDelivery { delivery: DeliveryMode },
    SetSpecificFocus { enabled: bool },
    SetExtendedSupport { enabled: bool },
    SubmitContact { name: String, whatsapp: String, bairro: String },
    Advance,
    Back,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl FunnelState {
    /// Campaign links pre-select the objective and land on step 2.
    pub fn with_objective(objective: Option<Objective>) -> Self {
        match objective {
            Some(objective) => Self {
                step: 2,
                objective: Some(objective),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Monthly total: assessment fee plus every selected surcharge.
    pub fn total(&self) -> u64 {
        let mut total = ASSESSMENT_FEE;
        if let Some(frequency) = self.frequency {
            total += frequency.monthly_price();
        }
        if self.delivery == Some(DeliveryMode::Hibrido) {
            total += HYBRID_SURCHARGE;
        }
        if self.specific_focus {
            total += FOCUS_SURCHARGE;
        }
        if self.extended_support {
            total += SUPPORT_SURCHARGE;
        }
        total
    }

    /// Applies one event. Selection events record the choice and advance;
    /// advancing is gated by the current step's validation and on failure
    /// returns the blocking message without changing the step.
    pub fn apply(&mut self, event: FunnelEvent) -> Result<(), &'static str> {
        match event {
            FunnelEvent::SelectObjective { objective } => {
                self.objective = Some(objective);
                self.advance()
            }
            FunnelEvent::SelectFrequency { frequency } => {
                self.frequency = Some(frequency);
                self.advance()
            }
            FunnelEvent::SelectDelivery { delivery } => {
                self.delivery = Some(delivery);
                self.advance()
            }
            FunnelEvent::SetSpecificFocus { enabled } => {
                self.specific_focus = enabled;
                self.advance()
            }
            FunnelEvent::SetExtendedSupport { enabled } => {
                self.extended_support = enabled;
                self.advance()
            }
            FunnelEvent::SubmitContact { name, whatsapp, bairro } => {
                self.name = name.trim().to_string();
                self.whatsapp = whatsapp.trim().to_string();
                self.bairro = bairro.trim().to_string();
                self.advance()
            }
            FunnelEvent::Advance => self.advance(),
            FunnelEvent::Back => {
                if self.step > 1 {
                    self.step -= 1;
                }
                Ok(())
            }
        }
    }

    fn advance(&mut self) -> Result<(), &'static str> {
        self.validate_step()?;
        if self.step < TOTAL_STEPS {
            self.step += 1;
        }
        Ok(())
    }

    fn validate_step(&self) -> Result<(), &'static str> {
        match self.step {
            1 if self.objective.is_none() => {
                Err("Por favor, selecione seu objetivo principal.")
            }
            3 if self.frequency.is_none() => {
                Err("Por favor, selecione a frequência de sessões.")
            }
            4 if self.delivery.is_none() => Err("Por favor, selecione a modalidade."),
            CONTACT_STEP => {
                if self.name.is_empty() || self.whatsapp.is_empty() || self.bairro.is_empty() {
                    return Err("Por favor, preencha todos os campos.");
                }
                if !valid_phone(&self.whatsapp) {
                    return Err("Por favor, insira um número de WhatsApp válido (9 dígitos).");
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Breakdown shown on the summary step.
    pub fn summary(&self) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine {
                label: "Objetivo".to_string(),
                value: self
                    .objective
                    .map(|objective| objective.label().to_string())
                    .unwrap_or_else(|| "Não informado".to_string()),
            },
            SummaryLine {
                label: "Avaliação funcional + bioimpedância".to_string(),
                value: format_mt(ASSESSMENT_FEE),
            },
            SummaryLine {
                label: "Plano".to_string(),
                value: self
                    .frequency
                    .map(|frequency| {
                        format!(
                            "{} - {}/mês",
                            frequency.label(),
                            format_mt(frequency.monthly_price())
                        )
                    })
                    .unwrap_or_else(|| "Não selecionado".to_string()),
            },
            SummaryLine {
                label: "Modalidade".to_string(),
                value: self
                    .delivery
                    .map(|delivery| delivery.label().to_string())
                    .unwrap_or_else(|| "Não selecionado".to_string()),
            },
        ];

        if self.delivery == Some(DeliveryMode::Hibrido) {
            lines.push(SummaryLine {
                label: "Modalidade Híbrida".to_string(),
                value: format!("+{}/mês", format_mt(HYBRID_SURCHARGE)),
            });
        }
        if self.specific_focus {
            lines.push(SummaryLine {
                label: "Foco Específico".to_string(),
                value: format!("+{}/mês", format_mt(FOCUS_SURCHARGE)),
            });
        }
        if self.extended_support {
            lines.push(SummaryLine {
                label: "Suporte Contínuo".to_string(),
                value: format!("+{}/mês", format_mt(SUPPORT_SURCHARGE)),
            });
        }

        lines
    }

    /// The pre-filled message opened on the final step.
    pub fn whatsapp_message(&self) -> String {
        let objective = self
            .objective
            .map(Objective::label)
            .unwrap_or("Não informado");
        let plan = self
            .frequency
            .map(|frequency| {
                format!(
                    "{} ({}/mês)",
                    frequency.label(),
                    format_mt(frequency.monthly_price())
                )
            })
            .unwrap_or_else(|| "Não selecionado".to_string());
        let delivery = self
            .delivery
            .map(DeliveryMode::label)
            .unwrap_or("Não selecionado");

        let mut services = format!(
            "- Avaliação funcional + bioimpedância ({})\n- Plano: {}\n- Modalidade: {}",
            format_mt(ASSESSMENT_FEE),
            plan,
            delivery
        );
        if self.delivery == Some(DeliveryMode::Hibrido) {
            services.push_str(&format!(
                "\n- Modalidade Híbrida: +{}/mês",
                format_mt(HYBRID_SURCHARGE)
            ));
        }
        if self.specific_focus {
            services.push_str(&format!(
                "\n- Foco específico: +{}/mês",
                format_mt(FOCUS_SURCHARGE)
            ));
        }
        if self.extended_support {
            services.push_str(&format!(
                "\n- Suporte contínuo: +{}/mês",
                format_mt(SUPPORT_SURCHARGE)
            ));
        }

        format!(
            "Olá Jaime, tudo bem?\n\nMeu nome é {}.\n\nObjetivo: {}\n\nServiços escolhidos:\n{}\n\nLocal: Atendimento domiciliar – {}\n\nValor total mensal estimado: {}\n\nAguardo confirmação e formas de pagamento.",
            self.name,
            objective,
            services,
            self.bairro,
            format_mt(self.total())
        )
    }

    pub fn whatsapp_url(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            WHATSAPP_NUMBER,
            encode_uri_component(&self.whatsapp_message())
        )
    }
}

/// `encodeURIComponent` over UTF-8 bytes; unreserved characters pass through.
fn encode_uri_component(src: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(src.len() * 3);
    for &b in src.as_bytes() {
        let unescaped = b.is_ascii_alphanumeric()
            || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if unescaped {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_state() -> FunnelState {
        FunnelState {
            step: WHATSAPP_STEP,
            objective: Some(Objective::Reabilitacao),
            frequency: Some(Frequency::TwicePerWeek),
            delivery: Some(DeliveryMode::Hibrido),
            specific_focus: true,
            extended_support: true,
            name: "Ana Macuácua".to_string(),
            whatsapp: "841234567".to_string(),
            bairro: "Polana".to_string(),
        }
    }

    #[test]
    fn total_covers_every_surcharge_combination() {
        let frequencies = [
            None,
            Some(Frequency::OncePerWeek),
            Some(Frequency::TwicePerWeek),
            Some(Frequency::ThricePerWeek),
            Some(Frequency::FiveTimesPerWeek),
        ];
        let deliveries = [None, Some(DeliveryMode::Presencial), Some(DeliveryMode::Hibrido)];

        for frequency in frequencies {
            for delivery in deliveries {
                for specific_focus in [false, true] {
                    for extended_support in [false, true] {
                        let state = FunnelState {
                            frequency,
                            delivery,
                            specific_focus,
                            extended_support,
                            ..FunnelState::default()
                        };
                        let expected = ASSESSMENT_FEE
                            + frequency.map_or(0, Frequency::monthly_price)
                            + if delivery == Some(DeliveryMode::Hibrido) {
                                HYBRID_SURCHARGE
                            } else {
                                0
                            }
                            + if specific_focus { FOCUS_SURCHARGE } else { 0 }
                            + if extended_support { SUPPORT_SURCHARGE } else { 0 };
                        assert_eq!(state.total(), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn advance_without_objective_is_rejected() {
        let mut state = FunnelState::default();
        let err = state.apply(FunnelEvent::Advance).unwrap_err();
        assert_eq!(err, "Por favor, selecione seu objetivo principal.");
        assert_eq!(state.step, 1);

        state
            .apply(FunnelEvent::SelectObjective {
                objective: Objective::Idosos,
            })
            .unwrap();
        assert_eq!(state.step, 2);
    }

    #[test]
    fn frequency_and_delivery_gates() {
        let mut state = FunnelState {
            step: 3,
            objective: Some(Objective::Atletas),
            ..FunnelState::default()
        };
        assert!(state.apply(FunnelEvent::Advance).is_err());
        state
            .apply(FunnelEvent::SelectFrequency {
                frequency: Frequency::OncePerWeek,
            })
            .unwrap();
        assert_eq!(state.step, 4);

        assert!(state.apply(FunnelEvent::Advance).is_err());
        state
            .apply(FunnelEvent::SelectDelivery {
                delivery: DeliveryMode::Presencial,
            })
            .unwrap();
        assert_eq!(state.step, 5);
    }

    #[test]
    fn contact_step_validates_fields_and_phone() {
        let mut state = FunnelState {
            step: CONTACT_STEP,
            ..completed_state()
        };

        let missing = state.apply(FunnelEvent::SubmitContact {
            name: "  ".to_string(),
            whatsapp: "841234567".to_string(),
            bairro: "Polana".to_string(),
        });
        assert_eq!(missing.unwrap_err(), "Por favor, preencha todos os campos.");
        assert_eq!(state.step, CONTACT_STEP);

        for bad_phone in ["84123456", "8412345678", "84123456a", "84 123456"] {
            let err = state
                .apply(FunnelEvent::SubmitContact {
                    name: "Ana".to_string(),
                    whatsapp: bad_phone.to_string(),
                    bairro: "Polana".to_string(),
                })
                .unwrap_err();
            assert_eq!(
                err,
                "Por favor, insira um número de WhatsApp válido (9 dígitos)."
            );
            assert_eq!(state.step, CONTACT_STEP);
        }

        state
            .apply(FunnelEvent::SubmitContact {
                name: " Ana ".to_string(),
                whatsapp: " 841234567 ".to_string(),
                bairro: " Polana ".to_string(),
            })
            .unwrap();
        assert_eq!(state.step, WHATSAPP_STEP);
        assert_eq!(state.name, "Ana");
        assert_eq!(state.whatsapp, "841234567");
    }

    #[test]
    fn back_stops_at_first_step_and_advance_at_last() {
        let mut state = FunnelState::default();
        state.apply(FunnelEvent::Back).unwrap();
        assert_eq!(state.step, 1);

        let mut state = completed_state();
        state.apply(FunnelEvent::Advance).unwrap();
        assert_eq!(state.step, TOTAL_STEPS);
    }

    #[test]
    fn objective_query_seeds_step_two() {
        let seeded = FunnelState::with_objective(Objective::from_query("idosos"));
        assert_eq!(seeded.step, 2);
        assert_eq!(seeded.objective, Some(Objective::Idosos));

        let unseeded = FunnelState::with_objective(Objective::from_query("crossfit"));
        assert_eq!(unseeded.step, 1);
        assert_eq!(unseeded.objective, None);
    }

    #[test]
    fn summary_lists_only_selected_surcharges() {
        let state = completed_state();
        let summary = state.summary();
        let labels: Vec<&str> = summary.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Objetivo",
                "Avaliação funcional + bioimpedância",
                "Plano",
                "Modalidade",
                "Modalidade Híbrida",
                "Foco Específico",
                "Suporte Contínuo",
            ]
        );

        let bare = FunnelState {
            delivery: Some(DeliveryMode::Presencial),
            specific_focus: false,
            extended_support: false,
            ..completed_state()
        };
        assert_eq!(bare.summary().len(), 4);
    }

    #[test]
    fn whatsapp_message_embeds_choices_and_total() {
        let state = completed_state();
        let message = state.whatsapp_message();
        assert!(message.contains("Meu nome é Ana Macuácua."));
        assert!(message.contains("Objetivo: Reabilitação / Dor"));
        assert!(message.contains("- Plano: 2x por semana (7.000 MT/mês)"));
        assert!(message.contains("- Modalidade Híbrida: +1.500 MT/mês"));
        assert!(message.contains("Atendimento domiciliar – Polana"));
        assert!(message.contains("Valor total mensal estimado: 11.000 MT"));

        let url = state.whatsapp_url();
        assert!(url.starts_with("https://wa.me/258842391741?text=Ol%C3%A1%20Jaime"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn encode_uri_component_matches_browser_rules() {
        assert_eq!(encode_uri_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_uri_component("ção"), "%C3%A7%C3%A3o");
    }
}

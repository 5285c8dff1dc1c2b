//! Rule-based analyzers comparing each strategic tool with the decision.
//!
//! Every analyzer starts at 100 points. Rules are independent deductions,
//! so their order never changes the result; the score floors at 0. An absent
//! analysis scores 0 with a single "not performed" issue.

use sim_core::{
    mentions_any, AlignmentIssue, BcgAnalysis, BcgQuadrant, BrandPositioning, Coverage,
    FeatureTier, MarketingMixDecision, PestelAnalysis, PorterAnalysis, PriceStrategy,
    ProductQuality, PromotionIntensity, SwotAnalysis, ToolAlignment,
};

/// Prices below this contradict a claimed quality advantage.
pub const PRICE_FLOOR: f64 = 50.0;
/// Prices above this contradict an economic crisis reading.
pub const PRICE_CEILING: f64 = 500.0;
/// Promotion spend a star product needs.
pub const STAR_PROMOTION_THRESHOLD: f64 = 5_000.0;

const QUALITY: &[&str] = &["qualidade", "quality", "premium", "superior", "excelên", "excelen"];
const PRICE: &[&str] = &["preço", "preco", "price", "caro", "expensive"];
const DIGITAL: &[&str] = &["digital", "online", "internet", "e-commerce", "ecommerce"];
const COMPETITION: &[&str] = &["concorr", "competi", "rival"];
const DISTRIBUTION: &[&str] = &["distribui", "alcance", "cobertura", "distribution", "reach"];
const CRISIS: &[&str] = &[
    "crise", "recess", "inflaç", "inflac", "desemprego", "crisis", "recession", "inflation",
    "unemployment",
];
const SUSTAINABILITY: &[&str] = &["sustent", "sustain", "ecológ", "ecolog", "consciente", "green"];
const ENVIRONMENTAL_CONCERN: &[&str] = &[
    "polui", "ambient", "carbono", "emiss", "resíduo", "residuo", "pollution", "carbon",
    "emission", "waste",
];

const FULL_SCORE: f64 = 100.0;

struct Deductions {
    issues: Vec<AlignmentIssue>,
}

impl Deductions {
    fn new() -> Self {
        Self { issues: Vec::new() }
    }

    fn check(&mut self, violated: bool, impact: f64, description: &str) {
        if violated {
            self.issues.push(AlignmentIssue {
                description: description.to_string(),
                impact,
            });
        }
    }

    fn finish(self) -> ToolAlignment {
        let deducted: f64 = self.issues.iter().map(|i| i.impact).sum();
        ToolAlignment {
            score: (FULL_SCORE + deducted).max(0.0),
            issues: self.issues,
        }
    }
}

fn not_performed(description: &str) -> ToolAlignment {
    ToolAlignment {
        score: 0.0,
        issues: vec![AlignmentIssue {
            description: description.to_string(),
            impact: -FULL_SCORE,
        }],
    }
}

pub fn analyze_swot(swot: Option<&SwotAnalysis>, d: &MarketingMixDecision) -> ToolAlignment {
    let Some(s) = swot else {
        return not_performed("Análise SWOT não realizada");
    };
    let claims_quality = mentions_any(&s.strengths, QUALITY);
    let mut r = Deductions::new();
    r.check(
        claims_quality && d.price < PRICE_FLOOR,
        -25.0,
        "SWOT indica qualidade superior, mas preço está muito baixo",
    );
    r.check(
        claims_quality && d.product_quality == ProductQuality::Basic,
        -20.0,
        "SWOT indica qualidade superior, mas o produto tem qualidade básica",
    );
    r.check(
        mentions_any(&s.weaknesses, PRICE) && d.price_strategy.is_premium(),
        -15.0,
        "SWOT aponta preço como fraqueza, mas a estratégia de preço é premium",
    );
    r.check(
        mentions_any(&s.opportunities, DIGITAL) && !d.has_digital_channel(),
        -15.0,
        "SWOT identifica oportunidade digital, mas não há canais online",
    );
    r.check(
        mentions_any(&s.threats, COMPETITION) && d.promotion_intensity == PromotionIntensity::Low,
        -10.0,
        "SWOT aponta ameaça competitiva, mas a intensidade promocional é baixa",
    );
    r.check(
        mentions_any(&s.weaknesses, DISTRIBUTION) && d.coverage == Coverage::Local,
        -10.0,
        "SWOT aponta fraqueza na distribuição, mas a cobertura é apenas local",
    );
    r.finish()
}

pub fn analyze_porter(porter: Option<&PorterAnalysis>, d: &MarketingMixDecision) -> ToolAlignment {
    let Some(p) = porter else {
        return not_performed("Análise das 5 Forças de Porter não realizada");
    };
    let mut r = Deductions::new();
    r.check(
        p.buyer_power.score >= 7 && d.price_strategy.is_premium(),
        -20.0,
        "Porter indica alto poder dos compradores, mas a estratégia de preço é premium",
    );
    r.check(
        p.rivalry.score >= 8 && d.promotion_intensity == PromotionIntensity::Low,
        -15.0,
        "Porter indica alta rivalidade, mas a intensidade promocional é baixa",
    );
    r.check(
        p.substitutes.score >= 7 && d.features == FeatureTier::Basic,
        -15.0,
        "Porter indica alta ameaça de substitutos, mas o produto tem poucas funcionalidades",
    );
    r.check(
        p.new_entrants.score >= 7 && d.brand_positioning == BrandPositioning::Economy,
        -10.0,
        "Porter indica alta ameaça de novos entrantes, mas o posicionamento de marca é fraco",
    );
    r.check(
        p.supplier_power.score >= 8 && d.price_strategy == PriceStrategy::Penetration,
        -15.0,
        "Porter indica alto poder dos fornecedores, mas a estratégia de preço é de penetração",
    );
    r.finish()
}

pub fn analyze_bcg(bcg: Option<&BcgAnalysis>, d: &MarketingMixDecision) -> ToolAlignment {
    let Some(b) = bcg else {
        return not_performed("Matriz BCG não realizada");
    };
    let inconsistent = b.products.iter().any(|p| {
        p.quadrant != BcgQuadrant::Unknown
            && p.quadrant != BcgQuadrant::classify(p.market_growth, p.relative_market_share)
    });
    let mut r = Deductions::new();
    r.check(
        b.has(BcgQuadrant::Star) && d.promotion_spend() < STAR_PROMOTION_THRESHOLD,
        -20.0,
        "BCG classifica produto como estrela, mas o investimento em promoção é baixo",
    );
    r.check(
        b.has(BcgQuadrant::Dog)
            && matches!(
                d.promotion_intensity,
                PromotionIntensity::High | PromotionIntensity::VeryHigh
            ),
        -15.0,
        "BCG classifica produto como abacaxi, mas a intensidade promocional é alta",
    );
    r.check(
        b.has(BcgQuadrant::QuestionMark) && d.coverage == Coverage::Local,
        -10.0,
        "BCG classifica produto como interrogação, mas a cobertura é apenas local",
    );
    r.check(
        b.has(BcgQuadrant::CashCow) && d.price_strategy == PriceStrategy::Penetration,
        -10.0,
        "BCG classifica produto como vaca leiteira, mas a estratégia de preço é de penetração",
    );
    r.check(
        inconsistent,
        -10.0,
        "BCG: quadrante informado não condiz com crescimento e participação relativa",
    );
    r.finish()
}

pub fn analyze_pestel(pestel: Option<&PestelAnalysis>, d: &MarketingMixDecision) -> ToolAlignment {
    let Some(p) = pestel else {
        return not_performed("Análise PESTEL não realizada");
    };
    let mut r = Deductions::new();
    r.check(
        mentions_any(&p.economic, CRISIS) && d.price > PRICE_CEILING,
        -20.0,
        "PESTEL indica crise econômica, mas preço está muito alto",
    );
    r.check(
        mentions_any(&p.technological, DIGITAL) && !d.has_digital_channel(),
        -10.0,
        "PESTEL aponta tendência digital, mas não há canais online",
    );
    r.check(
        mentions_any(&p.social, SUSTAINABILITY)
            && d.product_quality == ProductQuality::Basic
            && d.brand_positioning == BrandPositioning::Economy,
        -10.0,
        "PESTEL aponta consumo consciente, mas o produto é básico e de posicionamento econômico",
    );
    r.check(
        mentions_any(&p.environmental, ENVIRONMENTAL_CONCERN)
            && d.product_quality == ProductQuality::Basic,
        -10.0,
        "PESTEL aponta pressão ambiental, mas o produto tem qualidade básica",
    );
    r.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{BcgProduct, DistributionChannel, ForceAssessment};
    use std::collections::BTreeSet;

    fn decision() -> MarketingMixDecision {
        MarketingMixDecision {
            product_quality: ProductQuality::Premium,
            features: FeatureTier::Complete,
            brand_positioning: BrandPositioning::Premium,
            price_strategy: PriceStrategy::Premium,
            price: 10.0,
            channels: BTreeSet::from([DistributionChannel::Retail]),
            coverage: Coverage::Local,
            promotion_mix: BTreeSet::new(),
            promotion_intensity: PromotionIntensity::Low,
            promotion_budgets: None,
            estimated_cost: 0.0,
            submitted_at: None,
        }
    }

    fn force(score: u8) -> ForceAssessment {
        ForceAssessment {
            score,
            notes: "Avaliação detalhada da força".to_string(),
        }
    }

    #[test]
    fn quality_claim_with_low_price() {
        let swot = SwotAnalysis {
            strengths: vec!["Qualidade premium reconhecida".to_string()],
            ..Default::default()
        };
        let a = analyze_swot(Some(&swot), &decision());
        let issue = a
            .issues
            .iter()
            .find(|i| i.description == "SWOT indica qualidade superior, mas preço está muito baixo")
            .expect("price-quality issue");
        assert!(issue.impact <= -20.0);
        assert_eq!(a.score, 75.0);
    }

    #[test]
    fn missing_analysis_scores_zero() {
        let a = analyze_porter(None, &decision());
        assert_eq!(a.score, 0.0);
        assert_eq!(a.issues.len(), 1);
        assert!(a.issues[0].description.contains("não realizada"));
    }

    #[test]
    fn porter_rules_stack_and_floor() {
        let porter = PorterAnalysis {
            rivalry: force(9),
            new_entrants: force(3),
            substitutes: force(3),
            buyer_power: force(9),
            supplier_power: force(2),
            ai_content_percentage: 0.0,
        };
        let a = analyze_porter(Some(&porter), &decision());
        assert_eq!(a.issues.len(), 2);
        assert_eq!(a.score, 65.0);
    }

    #[test]
    fn star_needs_promotion() {
        let bcg = BcgAnalysis {
            products: vec![BcgProduct {
                product_name: "Linha A".into(),
                market_growth: 18.0,
                relative_market_share: 1.4,
                quadrant: BcgQuadrant::Star,
                notes: "Produto líder em mercado crescente".into(),
            }],
            ai_content_percentage: 0.0,
        };
        let mut d = decision();
        let a = analyze_bcg(Some(&bcg), &d);
        assert_eq!(a.score, 80.0);
        d.promotion_budgets = Some([("tv".to_string(), 12_000.0)].into());
        assert_eq!(analyze_bcg(Some(&bcg), &d).score, 100.0);
    }

    #[test]
    fn crisis_with_high_price() {
        let pestel = PestelAnalysis {
            economic: vec!["Crise econômica e desemprego em alta".into()],
            ..Default::default()
        };
        let mut d = decision();
        d.price = 900.0;
        let a = analyze_pestel(Some(&pestel), &d);
        assert_eq!(a.score, 80.0);
    }
}

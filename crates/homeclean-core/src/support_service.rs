/// One keyword rule of the support chat.
#[derive(Debug, Clone)]
pub struct SupportRule {
    pub keywords: Vec<&'static str>,
    pub response: &'static str,
}

/// Keyword -> canned response table; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct SupportRules {
    rules: Vec<SupportRule>,
    fallback: &'static str,
}

impl Default for SupportRules {
    fn default() -> Self {
        Self::new(
            vec![
                SupportRule {
                    keywords: vec!["cancel", "reschedule", "change date"],
                    response: "You can cancel or reschedule a booking up to 2 hours before the visit from My Bookings.",
                },
                SupportRule {
                    keywords: vec!["refund", "payment", "charged", "upi"],
                    response: "Refunds reach your original payment method within 5-7 working days.",
                },
                SupportRule {
                    keywords: vec!["price", "cost", "charges", "discount"],
                    response: "Prices depend on your home size and add-ons. Weekly plans save 15%.",
                },
                SupportRule {
                    keywords: vec!["late", "arrive", "where is", "maid"],
                    response: "Your maid is on the way. You will get a notification when they arrive.",
                },
                SupportRule {
                    keywords: vec!["skoops", "points", "reward"],
                    response: "Skoops are loyalty points shown on your profile.",
                },
                SupportRule {
                    keywords: vec!["hello", "hi", "hey"],
                    response: "Hi! How can we help with your cleaning today?",
                },
            ],
            "Thanks for reaching out. A support agent will reply shortly.",
        )
    }
}

impl SupportRules {
    pub fn new(rules: Vec<SupportRule>, fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[SupportRule] {
        &self.rules
    }

    pub fn respond(&self, message: &str) -> &'static str {
        let normalized = message.to_lowercase();
        let words: Vec<&str> = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        self.rules
            .iter()
            .find(|rule| {
                rule.keywords.iter().any(|keyword| {
                    if keyword.contains(' ') {
                        normalized.contains(keyword)
                    } else {
                        words.contains(keyword)
                    }
                })
            })
            .map(|rule| rule.response)
            .unwrap_or(self.fallback)
    }
}

//! Keyword rule table.
//!
//! Phrases are written the way they should look after normalization
//! (lowercase, no punctuation, accents stripped). Each topic lists English,
//! Russian, Spanish, Portuguese, French and German phrases, one line per
//! language.

use crate::taxonomy::Topic;

/// The phrases that flag one topic.
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub topic: Topic,
    pub phrases: &'static [&'static str],
}

#[rustfmt::skip]
pub static RULES: &[TopicRule] = &[
    TopicRule {
        topic: Topic::Onboarding,
        phrases: &[
            "onboarding", "tutorial", "getting started", "first lesson", "intro lesson", "sign up", "signup", "log in", "login", "register", "registration",
            "первые шаги", "вводный урок", "обучение", "подсказки", "регистрация", "войти", "вход",
            "primeros pasos", "registro", "iniciar sesion", "inicio de sesion",
            "primeiros passos", "iniciar sessao",
            "tutoriel", "premiers pas", "inscription", "connexion",
            "erste schritte", "registrierung", "anmeldung", "einloggen",
        ],
    },
    TopicRule {
        topic: Topic::Streak,
        phrases: &[
            "streak", "daily streak", "keep streak", "streak freeze",
            "серия", "стрик", "заморозка серии", "дневная серия",
            "racha", "racha diaria", "congelar racha",
            "sequencia", "sequencia diaria", "congelar sequencia",
            "serie", "serie quotidienne", "geler la serie",
            "tagesserie", "serie einfrieren",
        ],
    },
    TopicRule {
        topic: Topic::Ads,
        phrases: &[
            "ads", "ad", "advertising", "advertisement", "commercials", "too many ads", "banner ad", "video ad", "adblock",
            "реклама", "баннер", "ролик", "видео реклама", "слишком много рекламы", "адблок",
            "anuncios", "publicidad", "demasiados anuncios",
            "publicidade", "muitos anuncios",
            "publicite", "annonces", "trop de publicite",
            "werbung", "anzeigen", "zu viel werbung",
        ],
    },
    TopicRule {
        topic: Topic::Subscription,
        phrases: &[
            "subscription", "subscribe", "premium", "plus", "super", "payment", "price", "billing", "trial", "free trial", "refund", "cancel subscription",
            "подписка", "подпис", "оплат", "платеж", "цена", "стоимост", "пробный период", "триал", "возврат", "отмена подписки",
            "suscripcion", "suscrib", "pago", "precio", "facturacion", "prueba gratis", "reembolso", "cancelar suscripcion",
            "assinatura", "assinar", "pagamento", "preco", "faturamento", "teste gratis", "cancelar assinatura",
            "abonnement", "s abonner", "paiement", "prix", "facturation", "essai gratuit", "remboursement", "annuler l abonnement",
            "abo", "abonnieren", "zahlung", "preis", "abrechnung", "kostenloser test", "ruckerstattung", "abo kundigen",
        ],
    },
    TopicRule {
        topic: Topic::Bugs,
        phrases: &[
            "bug", "glitch", "crash", "crashes", "freezes", "freeze", "lag", "error", "not working", "broken",
            "баг", "глюк", "вылетает", "краш", "зависает", "лагает", "ошибка", "не работает",
            "no funciona", "se cierra", "bloquea", "falla",
            "erro", "nao funciona", "fecha", "trava", "falha",
            "erreur", "ne marche pas", "plante", "bloque", "ralentit",
            "fehler", "funktioniert nicht", "sturz", "absturz", "hangt", "ruckelt",
        ],
    },
    TopicRule {
        topic: Topic::Motivation,
        phrases: &[
            "motivate", "motivation", "habit", "progress", "goals", "reminders", "fun", "addictive", "encouraging",
            "вовлекает", "мотивация", "привычка", "прогресс", "цели", "напоминания", "интересно", "затягивает",
            "motiva", "motivacion", "habito", "progreso", "metas", "recordatorios", "divertido", "adictivo",
            "motivacao", "progresso", "lembretes", "viciante",
            "motiver", "habitude", "progres", "objectifs", "rappels", "amusant", "addictif",
            "motiviert", "gewohnheit", "fortschritt", "ziele", "erinnerungen", "macht spass", "suchtig",
        ],
    },
];

/// Phrases for `topic`, or an empty slice if the table has no rule for it.
pub fn phrases_for(topic: Topic) -> &'static [&'static str] {
    RULES
        .iter()
        .find(|rule| rule.topic == topic)
        .map(|rule| rule.phrases)
        .unwrap_or(&[])
}

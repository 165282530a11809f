// src/common/i18n.rs

use std::collections::HashMap;

// Idioma usado quando o cliente pede algo que não temos.
pub const DEFAULT_LANG: &str = "pt";

const PT: &[(&str, &str)] = &[
    ("validation_error", "Um ou mais campos são inválidos."),
    ("invalid_id", "ID inválido"),
    ("property_not_found", "Imóvel não encontrado"),
    ("invalid_filter", "Filtro de busca inválido"),
    ("invalid_payload", "Corpo da requisição inválido."),
    ("request_failed", "Erro ao processar solicitação"),
    ("internal_error", "Ocorreu um erro inesperado."),
    ("reorder_failed", "Erro ao atualizar ordem"),
    ("property_deleted", "Imóvel deletado com sucesso"),
    ("lead_sent", "Interesse enviado com sucesso!"),
];

const EN: &[(&str, &str)] = &[
    ("validation_error", "One or more fields are invalid."),
    ("invalid_id", "Invalid ID"),
    ("property_not_found", "Property not found"),
    ("invalid_filter", "Invalid search filter"),
    ("invalid_payload", "Invalid request body."),
    ("request_failed", "Failed to process request"),
    ("internal_error", "An unexpected error occurred."),
    ("reorder_failed", "Failed to update ordering"),
    ("property_deleted", "Property deleted successfully"),
    ("lead_sent", "Interest sent successfully!"),
];

/// Catálogo de mensagens por idioma (chave -> texto).
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("pt", PT.iter().copied().collect());
        catalogs.insert("en", EN.iter().copied().collect());
        Self { catalogs }
    }

    /// Traduz `key` para `lang`, caindo para o português e, em último caso,
    /// devolvendo a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.catalogs.get(lang).and_then(|c| c.get(key)).copied()
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_portuguese() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "invalid_id"), "ID inválido");
        assert_eq!(store.translate("en", "invalid_id"), "Invalid ID");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "no_such_key"), "no_such_key");
    }

    #[test]
    fn catalogs_cover_the_same_keys() {
        let pt: Vec<_> = PT.iter().map(|(k, _)| *k).collect();
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        assert_eq!(pt, en);
    }
}

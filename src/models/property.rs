// src/models/property.rs

use std::{cmp::Ordering, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- 1. O Imóvel (registro persistido) ---
// Os nomes no JSON continuam em português: é o formato do arquivo
// imoveis.json e o que o frontend já consome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Property {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "casa")]
    pub tipo: String,

    #[schema(example = "venda")]
    pub transacao: String,

    #[schema(example = "Muriaé")]
    pub cidade: String,

    #[schema(example = "Centro")]
    pub bairro: String,

    // Registros antigos podem não ter estes campos; assumem o valor "zero".
    #[serde(default)]
    pub rua: String,

    #[serde(default)]
    pub quartos: u32,

    #[serde(default)]
    pub banheiro: u32,

    #[serde(default)]
    pub vagas_garagem: u32,

    #[serde(default)]
    #[schema(example = "IM0001")]
    pub codigo: String,

    #[schema(example = 250000.0)]
    pub preco: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub visualizacoes: u64,

    #[serde(default)]
    pub ordem: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Código externo padrão: `IM` + id com 4 dígitos (IM0001).
pub fn default_code(id: u64) -> String {
    format!("IM{:04}", id)
}

// --- 2. Dados de criação ---
// Tudo que o cliente escolhe; id, visualizações, ordem e data são do servidor.
#[derive(Debug, Clone, Default)]
pub struct NewProperty {
    pub tipo: String,
    pub transacao: String,
    pub cidade: String,
    pub bairro: String,
    pub rua: String,
    pub quartos: u32,
    pub banheiro: u32,
    pub vagas_garagem: u32,
    pub codigo: Option<String>,
    pub preco: f64,
    pub descricao: Option<String>,
    pub images: Vec<String>,
}

impl NewProperty {
    pub fn into_property(self, id: u64, ordem: i64, created_at: DateTime<Utc>) -> Property {
        let codigo = match self.codigo {
            Some(c) if !c.trim().is_empty() => c,
            _ => default_code(id),
        };

        Property {
            id,
            tipo: self.tipo,
            transacao: self.transacao,
            cidade: self.cidade,
            bairro: self.bairro,
            rua: self.rua,
            quartos: self.quartos,
            banheiro: self.banheiro,
            vagas_garagem: self.vagas_garagem,
            codigo,
            preco: self.preco,
            descricao: self.descricao,
            images: self.images,
            visualizacoes: 0,
            ordem,
            created_at,
        }
    }
}

// --- 3. Atualização parcial ---
// Só os campos presentes são aplicados. `id` e `createdAt` são imutáveis.
#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
    pub tipo: Option<String>,
    pub transacao: Option<String>,
    pub cidade: Option<String>,
    pub bairro: Option<String>,
    pub rua: Option<String>,
    pub quartos: Option<u32>,
    pub banheiro: Option<u32>,
    pub vagas_garagem: Option<u32>,
    pub codigo: Option<String>,
    pub preco: Option<f64>,
    pub descricao: Option<String>,
    pub images: Option<Vec<String>>,
    pub visualizacoes: Option<u64>,
    pub ordem: Option<i64>,
}

impl PropertyPatch {
    pub fn apply_to(self, property: &mut Property) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut property.tipo, self.tipo);
        set(&mut property.transacao, self.transacao);
        set(&mut property.cidade, self.cidade);
        set(&mut property.bairro, self.bairro);
        set(&mut property.rua, self.rua);
        set(&mut property.quartos, self.quartos);
        set(&mut property.banheiro, self.banheiro);
        set(&mut property.vagas_garagem, self.vagas_garagem);
        set(&mut property.codigo, self.codigo);
        set(&mut property.preco, self.preco);
        set(&mut property.images, self.images);
        set(&mut property.visualizacoes, self.visualizacoes);
        set(&mut property.ordem, self.ordem);
        if self.descricao.is_some() {
            property.descricao = self.descricao;
        }
    }
}

// --- 4. Filtro de quartos ---
// "3" = exatamente 3; "5+" = 5 ou mais.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomFilter {
    Exactly(u32),
    AtLeast(u32),
}

impl RoomFilter {
    pub fn matches(&self, quartos: u32) -> bool {
        match *self {
            RoomFilter::Exactly(n) => quartos == n,
            RoomFilter::AtLeast(n) => quartos >= n,
        }
    }
}

impl FromStr for RoomFilter {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_suffix('+') {
            Some(n) => n.trim().parse().map(RoomFilter::AtLeast),
            None => s.parse().map(RoomFilter::Exactly),
        }
    }
}

// --- 5. Critérios de busca ---
// Todos os critérios presentes são combinados com AND; ausentes não restringem.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub transacao: Option<String>,
    pub tipo: Option<String>,
    pub cidade: Option<String>,
    pub bairro: Option<String>,
    pub quartos: Option<RoomFilter>,
    pub preco_min: Option<f64>,
    pub preco_max: Option<f64>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl PropertyFilter {
    pub fn is_empty(&self) -> bool {
        self.transacao.is_none()
            && self.tipo.is_none()
            && self.cidade.is_none()
            && self.bairro.is_none()
            && self.quartos.is_none()
            && self.preco_min.is_none()
            && self.preco_max.is_none()
    }

    pub fn matches(&self, p: &Property) -> bool {
        if let Some(transacao) = &self.transacao {
            if &p.transacao != transacao {
                return false;
            }
        }
        if let Some(tipo) = &self.tipo {
            if &p.tipo != tipo {
                return false;
            }
        }
        if let Some(cidade) = &self.cidade {
            if !contains_ignore_case(&p.cidade, cidade) {
                return false;
            }
        }
        if let Some(bairro) = &self.bairro {
            if !contains_ignore_case(&p.bairro, bairro) {
                return false;
            }
        }
        if let Some(quartos) = &self.quartos {
            if !quartos.matches(p.quartos) {
                return false;
            }
        }
        if let Some(min) = self.preco_min {
            if p.preco < min {
                return false;
            }
        }
        if let Some(max) = self.preco_max {
            if p.preco > max {
                return false;
            }
        }
        true
    }
}

// --- 6. Ordenação da listagem ---
// Valores aceitos em `?ordenacao=`: destaque, recente, menor-preco,
// maior-preco, mais-quartos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Pelo campo `ordem` (definido na tela de destaques), empate pelo id.
    #[default]
    Featured,
    Newest,
    LowestPrice,
    HighestPrice,
    MostBedrooms,
}

impl SortOrder {
    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortOrder::Featured => a.ordem.cmp(&b.ordem).then(a.id.cmp(&b.id)),
            SortOrder::Newest => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
            SortOrder::LowestPrice => a.preco.total_cmp(&b.preco),
            SortOrder::HighestPrice => b.preco.total_cmp(&a.preco),
            SortOrder::MostBedrooms => b.quartos.cmp(&a.quartos),
        }
    }

    /// Ordenação estável: empates mantêm a ordem de armazenamento.
    pub fn sort(&self, properties: &mut [Property]) {
        properties.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "destaque" => Ok(SortOrder::Featured),
            "recente" => Ok(SortOrder::Newest),
            "menor-preco" => Ok(SortOrder::LowestPrice),
            "maior-preco" => Ok(SortOrder::HighestPrice),
            "mais-quartos" => Ok(SortOrder::MostBedrooms),
            _ => Err(()),
        }
    }
}

// --- 7. Reordenação de destaques ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderEntry {
    #[serde(deserialize_with = "crate::common::serde_utils::required_u64")]
    #[schema(example = 3)]
    pub id: u64,

    #[serde(deserialize_with = "crate::common::serde_utils::required_i64")]
    #[schema(example = 0)]
    pub ordem: i64,
}

// --- 8. Estatísticas de visualização ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStats {
    pub total_imoveis: usize,
    pub total_visualizacoes: u64,
    pub media_visualizacoes: u64,
    /// Todos os imóveis, do mais visto para o menos visto.
    pub ranking: Vec<Property>,
}

impl PropertyStats {
    pub fn from_properties(mut properties: Vec<Property>) -> Self {
        let total_visualizacoes: u64 = properties.iter().map(|p| p.visualizacoes).sum();
        let media_visualizacoes = if properties.is_empty() {
            0
        } else {
            (total_visualizacoes as f64 / properties.len() as f64).round() as u64
        };

        properties.sort_by(|a, b| b.visualizacoes.cmp(&a.visualizacoes));

        Self {
            total_imoveis: properties.len(),
            total_visualizacoes,
            media_visualizacoes,
            ranking: properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn property(id: u64, cidade: &str, bairro: &str, quartos: u32, preco: f64) -> Property {
        NewProperty {
            tipo: "casa".into(),
            transacao: "venda".into(),
            cidade: cidade.into(),
            bairro: bairro.into(),
            quartos,
            preco,
            ..Default::default()
        }
        .into_property(id, id as i64, Utc.with_ymd_and_hms(2024, 1, id as u32, 12, 0, 0).unwrap())
    }

    #[test]
    fn default_code_is_zero_padded() {
        assert_eq!(default_code(1), "IM0001");
        assert_eq!(default_code(42), "IM0042");
        assert_eq!(default_code(12345), "IM12345");
    }

    #[test]
    fn blank_code_is_replaced_but_explicit_code_is_kept() {
        let now = Utc::now();
        let blank = NewProperty { codigo: Some("  ".into()), ..Default::default() };
        assert_eq!(blank.into_property(7, 0, now).codigo, "IM0007");

        let explicit = NewProperty { codigo: Some("AP-33".into()), ..Default::default() };
        assert_eq!(explicit.into_property(7, 0, now).codigo, "AP-33");
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let original = property(1, "Muriaé", "Centro", 3, 250000.0);
        let mut updated = original.clone();

        PropertyPatch { preco: Some(199000.0), ..Default::default() }.apply_to(&mut updated);

        assert_eq!(updated.preco, 199000.0);
        assert_eq!(Property { preco: original.preco, ..updated }, original);
    }

    #[test]
    fn room_filter_parses_exact_and_at_least() {
        assert_eq!("3".parse::<RoomFilter>().unwrap(), RoomFilter::Exactly(3));
        assert_eq!("5+".parse::<RoomFilter>().unwrap(), RoomFilter::AtLeast(5));
        assert!("muitos".parse::<RoomFilter>().is_err());

        assert!(RoomFilter::AtLeast(5).matches(7));
        assert!(!RoomFilter::AtLeast(5).matches(4));
        assert!(!RoomFilter::Exactly(2).matches(3));
    }

    #[test]
    fn city_and_neighbourhood_match_case_insensitive_substrings() {
        let p = property(1, "Muriaé", "Barra", 2, 100.0);

        let filter = PropertyFilter { cidade: Some("MURIA".into()), ..Default::default() };
        assert!(filter.matches(&p));

        let filter = PropertyFilter { bairro: Some("centro".into()), ..Default::default() };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = PropertyFilter {
            preco_min: Some(100.0),
            preco_max: Some(200.0),
            ..Default::default()
        };
        assert!(filter.matches(&property(1, "A", "B", 1, 100.0)));
        assert!(filter.matches(&property(2, "A", "B", 1, 200.0)));
        assert!(!filter.matches(&property(3, "A", "B", 1, 200.01)));
        assert!(!filter.matches(&property(4, "A", "B", 1, 99.99)));
    }

    #[test]
    fn transaction_and_type_need_exact_match() {
        let p = property(1, "A", "B", 1, 1.0);
        let filter = PropertyFilter { transacao: Some("Venda".into()), ..Default::default() };
        assert!(!filter.matches(&p));

        let filter = PropertyFilter {
            transacao: Some("venda".into()),
            tipo: Some("casa".into()),
            ..Default::default()
        };
        assert!(filter.matches(&p));
        assert!(PropertyFilter::default().is_empty());
        assert!(!filter.is_empty());
    }

    #[test]
    fn sort_orders() {
        let mut list = vec![
            property(1, "A", "B", 2, 300.0),
            property(2, "A", "B", 4, 100.0),
            property(3, "A", "B", 3, 200.0),
        ];
        list[0].ordem = 2;
        list[1].ordem = 0;
        list[2].ordem = 1;

        let ids = |l: &[Property]| l.iter().map(|p| p.id).collect::<Vec<_>>();

        SortOrder::Featured.sort(&mut list);
        assert_eq!(ids(&list), vec![2, 3, 1]);

        SortOrder::Newest.sort(&mut list);
        assert_eq!(ids(&list), vec![3, 2, 1]);

        SortOrder::LowestPrice.sort(&mut list);
        assert_eq!(ids(&list), vec![2, 3, 1]);

        SortOrder::HighestPrice.sort(&mut list);
        assert_eq!(ids(&list), vec![1, 3, 2]);

        SortOrder::MostBedrooms.sort(&mut list);
        assert_eq!(ids(&list), vec![2, 3, 1]);

        assert_eq!("maior-preco".parse::<SortOrder>(), Ok(SortOrder::HighestPrice));
        assert!("aleatorio".parse::<SortOrder>().is_err());
    }

    #[test]
    fn stats_rank_by_views_and_round_the_average() {
        let mut a = property(1, "A", "B", 1, 1.0);
        let mut b = property(2, "A", "B", 1, 1.0);
        let c = property(3, "A", "B", 1, 1.0);
        a.visualizacoes = 2;
        b.visualizacoes = 3;

        let stats = PropertyStats::from_properties(vec![a, b, c]);
        assert_eq!(stats.total_imoveis, 3);
        assert_eq!(stats.total_visualizacoes, 5);
        assert_eq!(stats.media_visualizacoes, 2);
        assert_eq!(stats.ranking.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1, 3]);

        let empty = PropertyStats::from_properties(Vec::new());
        assert_eq!(empty.media_visualizacoes, 0);
    }

    #[test]
    fn legacy_records_without_optional_fields_still_load() {
        let json = r#"{
            "id": 9, "tipo": "apartamento", "transacao": "aluguel",
            "cidade": "Muriaé", "bairro": "Centro", "preco": 1500,
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let p: Property = serde_json::from_str(json).unwrap();
        assert_eq!(p.visualizacoes, 0);
        assert!(p.images.is_empty());
        assert_eq!(p.descricao, None);
        assert_eq!(p.rua, "");
    }
}

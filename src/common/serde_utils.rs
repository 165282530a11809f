// src/common/serde_utils.rs

// Formulários HTML mandam números como texto ("3", "250000").
// Estes helpers aceitam tanto número JSON quanto string numérica;
// string vazia conta como campo ausente.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn to_number(raw: NumberOrText) -> Result<Option<f64>, String> {
    let value = match raw {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|_| format!("valor numérico inválido: '{}'", text))?
        }
    };

    if !value.is_finite() {
        return Err(format!("valor numérico inválido: {}", value));
    }
    Ok(Some(value))
}

fn to_integer<T: TryFrom<i64>>(raw: NumberOrText) -> Result<Option<T>, String> {
    let Some(value) = to_number(raw)? else {
        return Ok(None);
    };
    if value.fract() != 0.0 {
        return Err(format!("esperado um número inteiro, recebido {}", value));
    }
    // `as` satura; fora desta faixa o valor não cabe em i64.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(format!("número fora do intervalo permitido: {}", value));
    }
    T::try_from(value as i64)
        .map(Some)
        .map_err(|_| format!("número fora do intervalo permitido: {}", value))
}

fn optional_with<'de, D, T>(
    deserializer: D,
    convert: fn(NumberOrText) -> Result<Option<T>, String>,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(raw) => convert(raw).map_err(de::Error::custom),
        None => Ok(None),
    }
}

pub fn optional_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    optional_with(d, to_number)
}

pub fn optional_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    optional_with(d, to_integer::<u32>)
}

pub fn optional_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    optional_with(d, to_integer::<u64>)
}

pub fn optional_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    optional_with(d, to_integer::<i64>)
}

pub fn required_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    optional_u64(d)?.ok_or_else(|| de::Error::custom("valor obrigatório"))
}

pub fn required_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    optional_i64(d)?.ok_or_else(|| de::Error::custom("valor obrigatório"))
}

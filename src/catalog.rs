use serde::Serialize;

/// A storefront product. The catalog is fixed at compile time and read-only
/// at runtime; prices are whole meticais.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub price: u64,
    pub glyph: &'static str,
    pub category: &'static str,
}

pub const PRODUCTS: [Product; 9] = [
    Product {
        id: 1,
        name: "Boné Snapback Premium",
        price: 450,
        glyph: "🧢",
        category: "bonés",
    },
    Product {
        id: 2,
        name: "Boné Trucker Clássico",
        price: 380,
        glyph: "⛑️",
        category: "bonés",
    },
    Product {
        id: 3,
        name: "Boné Beanie Inverno",
        price: 250,
        glyph: "🎩",
        category: "bonés",
    },
    Product {
        id: 4,
        name: "Arte Digital Abstrata",
        price: 1200,
        glyph: "🎨",
        category: "artes",
    },
    Product {
        id: 5,
        name: "Pintura Moderna",
        price: 1500,
        glyph: "🖼️",
        category: "artes",
    },
    Product {
        id: 6,
        name: "Arte em Tela Personalizada",
        price: 2000,
        glyph: "🖌️",
        category: "artes",
    },
    Product {
        id: 7,
        name: "Camiseta Básica Premium",
        price: 350,
        glyph: "👕",
        category: "roupas",
    },
    Product {
        id: 8,
        name: "Camiseta Estampada",
        price: 420,
        glyph: "👔",
        category: "roupas",
    },
    Product {
        id: 9,
        name: "Moletom com Capuz",
        price: 680,
        glyph: "🧥",
        category: "roupas",
    },
];

pub fn find(id: u32) -> Option<&'static Product> {
    PRODUCTS.iter().find(|product| product.id == id)
}

/// Formats a metical amount in the pt-MZ style used across both pages,
/// e.g. `1.500 MT`.
pub fn format_mt(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && index % 3 == offset {
            out.push('.');
        }
        out.push(ch);
    }
    out.push_str(" MT");
    out
}

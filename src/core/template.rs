use crate::domain::model::Party;

pub const TITLE: &str = "Contrato de Prestação de Serviços";
pub const PURPOSE_HEADING: &str = "Objeto do Contrato";
pub const PURPOSE: &str =
    "O presente contrato tem como objeto a prestação de serviços de acordo entre as partes.";
pub const CLAUSES_HEADING: &str = "Cláusulas";
pub const CLAUSES: [&str; 3] = [
    "1. O Contratado se compromete a prestar os serviços especificados neste contrato.",
    "2. O Contratante pagará ao Contratado o valor acordado pelas partes.",
    "3. As partes concordam que este contrato poderá ser rescindido em caso de descumprimento de suas cláusulas.",
];
pub const SIGNATURE_LINE: &str = "_______________________________";

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: blue; text-align: center; }
h2 { color: darkblue; }
p { font-size: 16px; line-height: 1.5; }
.section { margin-bottom: 20px; }
.signature { margin-top: 50px; }";

/// One labeled line inside a party block, e.g. `CPF: 111.111.111-11`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartySection {
    pub heading: &'static str,
    pub fields: [Field; 2],
}

/// The contract content independent of output format.
///
/// HTML and the fixed-layout file are both produced from this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractText {
    pub title: &'static str,
    pub contracting: PartySection,
    pub contracted: PartySection,
    pub purpose_heading: &'static str,
    pub purpose: &'static str,
    pub clauses_heading: &'static str,
    pub clauses: [&'static str; 3],
    pub signatures: [&'static str; 2],
}

impl ContractText {
    pub fn new(contracting: &Party, contracted: &Party) -> Self {
        Self {
            title: TITLE,
            contracting: PartySection {
                heading: "Parte Contratante",
                fields: [
                    Field {
                        label: "Contratante:",
                        value: contracting.name.clone(),
                    },
                    Field {
                        label: "CPF:",
                        value: contracting.tax_id.clone(),
                    },
                ],
            },
            contracted: PartySection {
                heading: "Parte Contratado",
                fields: [
                    Field {
                        label: "Nome:",
                        value: contracted.name.clone(),
                    },
                    Field {
                        label: "CPF:",
                        value: contracted.tax_id.clone(),
                    },
                ],
            },
            purpose_heading: PURPOSE_HEADING,
            purpose: PURPOSE,
            clauses_heading: CLAUSES_HEADING,
            clauses: CLAUSES,
            signatures: ["Assinatura do Contratante", "Assinatura do Contratado"],
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str(&format!("<meta charset=\"utf-8\">\n<title>{}</title>\n", self.title));
        html.push_str(&format!("<style>\n{}\n</style>\n", STYLE));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", self.title));

        for section in [&self.contracting, &self.contracted] {
            html.push_str("<div class=\"section\">\n");
            html.push_str(&format!("<h2>{}</h2>\n", section.heading));
            for field in &section.fields {
                html.push_str(&format!(
                    "<p><strong>{}</strong> {}</p>\n",
                    field.label,
                    escape_text(&field.value)
                ));
            }
            html.push_str("</div>\n");
        }

        html.push_str("<div class=\"section\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", self.purpose_heading));
        html.push_str(&format!("<p>{}</p>\n", self.purpose));
        html.push_str("</div>\n");

        html.push_str("<div class=\"section\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", self.clauses_heading));
        for clause in &self.clauses {
            html.push_str(&format!("<p>{}</p>\n", clause));
        }
        html.push_str("</div>\n");

        html.push_str("<div class=\"signature\">\n");
        for label in &self.signatures {
            html.push_str(&format!("<p>{}</p>\n<p>{}</p>\n", SIGNATURE_LINE, label));
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

/// Renders the contract HTML for the two parties. Pure and deterministic.
pub fn render_contract(contracting: &Party, contracted: &Party) -> String {
    ContractText::new(contracting, contracted).to_html()
}

/// Escapes only the characters that would break the markup. Everything else,
/// accents included, passes through unchanged.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maria() -> Party {
        Party::new("Maria Silva", "111.111.111-11")
    }

    fn joao() -> Party {
        Party::new("João Souza", "222.222.222-22")
    }

    #[test]
    fn test_party_values_in_their_positions() {
        let html = render_contract(&maria(), &joao());

        assert!(html.contains("<p><strong>Contratante:</strong> Maria Silva</p>"));
        assert!(html.contains("<p><strong>CPF:</strong> 111.111.111-11</p>"));
        assert!(html.contains("<p><strong>Nome:</strong> João Souza</p>"));
        assert!(html.contains("<p><strong>CPF:</strong> 222.222.222-22</p>"));

        let contracting_at = html.find("Parte Contratante").unwrap();
        let contracted_at = html.find("Parte Contratado").unwrap();
        let maria_at = html.find("Maria Silva").unwrap();
        let joao_at = html.find("João Souza").unwrap();
        assert!(contracting_at < maria_at && maria_at < contracted_at);
        assert!(contracted_at < joao_at);
    }

    #[test]
    fn test_each_value_appears_once() {
        let html = render_contract(&maria(), &joao());
        assert_eq!(html.matches("Maria Silva").count(), 1);
        assert_eq!(html.matches("João Souza").count(), 1);
        assert_eq!(html.matches("111.111.111-11").count(), 1);
        assert_eq!(html.matches("222.222.222-22").count(), 1);
    }

    #[test]
    fn test_fixed_sections_present() {
        let html = render_contract(&maria(), &joao());
        assert_eq!(html.matches("<h1>").count(), 1);
        assert!(html.contains(PURPOSE));
        for clause in CLAUSES {
            assert!(html.contains(clause));
        }
        assert_eq!(html.matches(SIGNATURE_LINE).count(), 2);
        assert!(html.contains("Assinatura do Contratante"));
        assert!(html.contains("Assinatura do Contratado"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(
            render_contract(&maria(), &joao()),
            render_contract(&maria(), &joao())
        );
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let tricky = Party::new("Ana <b>& Cia</b>", "\"1\"");
        let html = render_contract(&tricky, &joao());
        assert!(html.contains("Ana &lt;b&gt;&amp; Cia&lt;/b&gt;"));
        assert!(html.contains("&quot;1&quot;"));
        assert!(!html.contains("<b>"));
    }
}

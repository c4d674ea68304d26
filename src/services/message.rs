use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

use crate::config::HandoffConfig;
use crate::error::{Result, WorkflowError};
use crate::models::{CustomerInfo, SelectedFile};
use crate::utils::format::folder_name;

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Which family of opening line a count falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Counts with a dedicated text: 1, 2, 3, 4, 5, 10 and 15
    Fixed,
    /// 6 to 9 images, nudges toward the Profissional package
    SuggestProfessional,
    /// 11 to 14 images, nudges toward the Premium package
    SuggestPremium,
    Generic,
}

/// Opening line of the handoff message, picked from the number of images.
/// Only built through [`MessageTemplate::for_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    kind: TemplateKind,
    count: usize,
}

impl MessageTemplate {
    pub fn for_count(count: usize) -> Self {
        let kind = match count {
            1..=5 | 10 | 15 => TemplateKind::Fixed,
            6..=9 => TemplateKind::SuggestProfessional,
            11..=14 => TemplateKind::SuggestPremium,
            _ => TemplateKind::Generic,
        };
        Self { kind, count }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn render(self) -> String {
        match self.kind {
            TemplateKind::Fixed => Self::fixed_text(self.count).to_string(),
            TemplateKind::SuggestProfessional => format!(
                "Olá! Tenho {} imagens para editar. Qual seria o melhor pacote para essa quantidade? Talvez o Profissional? 📸✨",
                self.count
            ),
            TemplateKind::SuggestPremium => format!(
                "Olá! Tenho {} imagens para editar. Estou pensando no Pacote Premium. Podemos conversar sobre o valor? 📸✨",
                self.count
            ),
            TemplateKind::Generic => format!(
                "Olá! Tenho {} imagens para edição profissional. Poderia me enviar um orçamento especial baseado nos seus pacotes? 📸✨",
                self.count
            ),
        }
    }

    fn fixed_text(count: usize) -> &'static str {
        match count {
            1 => "Olá! Gostaria de solicitar a edição de 1 imagem. Poderia me enviar um orçamento? 📸",
            2 => "Olá! Tenho 2 imagens que precisam de edição profissional. Qual seria o valor? 📸📸",
            3 => "Olá! Preciso editar 3 imagens. Poderia me passar um orçamento detalhado? 📸📸📸",
            4 => "Olá! Tenho 4 imagens para edição. Qual seria o melhor plano para mim? 📸📸📸📸",
            5 => "Olá! Tenho 5 imagens para editar. Gostaria do Pacote Básico (R$ 50). Podemos fechar? 📸📸📸📸📸",
            10 => "Olá! Tenho 10 imagens para editar. Gostaria do Pacote Profissional (R$ 100 + 2 de brinde). Vamos fechar? 📸✨",
            15 => "Olá! Tenho 15 imagens para editar. Gostaria do Pacote Premium (R$ 150 + 3 de brinde). Podemos conversar? 📸✨",
            _ => unreachable!("for_count only assigns Fixed to counts with a dedicated text"),
        }
    }
}

/// Everything produced for a single handoff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffLink {
    pub message: String,
    pub folder_name: String,
    pub url: String,
}

/// Builds the full message text for the given working set and customer
pub fn build_message(files: &[SelectedFile], customer: &CustomerInfo) -> String {
    let count = files.len();
    let template = MessageTemplate::for_count(count);
    tracing::debug!("Using {:?} for {} file(s)", template, count);

    let file_names = files
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut message = format!("{}\n\n", template.render());
    message.push_str(&format!("👤 Cliente: {}\n", customer.name));
    if let Some(phone) = &customer.phone {
        message.push_str(&format!("📱 WhatsApp: {}\n", phone));
    }
    message.push_str(&format!("📁 Total de imagens: {}\n", count));
    message.push_str(&format!("📋 Arquivos: {}\n\n", file_names));
    message.push_str(&format!(
        "🗂️ *PASTA DE ORGANIZAÇÃO: {}*\n\n",
        folder_name(&customer.name)
    ));
    message.push_str(
        "Por favor, organize as imagens na pasta com o nome do cliente para facilitar o trabalho! 📂",
    );
    message
}

/// Percent-encodes a message the way `encodeURIComponent` does
pub fn encode_message(message: &str) -> String {
    utf8_percent_encode(message, URI_COMPONENT).to_string()
}

/// Builds the outbound link. Refuses to run without files or a customer name.
pub fn build_handoff(
    config: &HandoffConfig,
    files: &[SelectedFile],
    customer: &CustomerInfo,
) -> Result<HandoffLink> {
    if files.is_empty() {
        return Err(WorkflowError::NoFilesSelected);
    }
    if customer.name.trim().is_empty() {
        return Err(WorkflowError::EmptyCustomerName);
    }

    let message = build_message(files, customer);
    let url = format!("{}{}", config.link_prefix(), encode_message(&message));

    Ok(HandoffLink {
        folder_name: folder_name(&customer.name),
        message,
        url,
    })
}

//! Group header state shared by both initiation builders

use crate::{
    aggregate::ControlTotals,
    config::{Config, RenderConfig},
    document::common,
    types::{check_text, IbanCheck, Party, MAX_ID_LEN},
    Error, Result,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// `CreDtTm` rendering (ISODateTime without offset)
pub const CREATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Group header of an initiation message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupHeader {
    message_id: String,
    created_at: NaiveDateTime,
    initiator: Party,
    totals: ControlTotals,
}

impl GroupHeader {
    /// Validate and create a header with empty totals.
    ///
    /// A missing message id is replaced by a generated one.
    pub fn new(
        message_id: Option<&str>,
        initiator_name: &str,
        created_at: NaiveDateTime,
    ) -> Result<Self> {
        let message_id = match message_id {
            Some(id) => {
                check_text("MsgId", id, MAX_ID_LEN)?;
                id.to_string()
            }
            None => generate_message_id(),
        };
        let initiator = Party::new(initiator_name)?;

        Ok(Self {
            message_id,
            created_at,
            initiator,
            totals: ControlTotals::new(),
        })
    }

    /// Message id
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Creation timestamp
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Initiating party
    pub fn initiator(&self) -> &Party {
        &self.initiator
    }

    /// Message-wide totals
    pub fn totals(&self) -> ControlTotals {
        self.totals
    }

    pub(crate) fn totals_mut(&mut self) -> &mut ControlTotals {
        &mut self.totals
    }

    pub(crate) fn to_document(&self) -> common::GroupHeader {
        common::GroupHeader {
            message_id: self.message_id.clone(),
            creation_date_time: self.created_at.format(CREATION_FORMAT).to_string(),
            number_of_transactions: self.totals.count(),
            control_sum: self.totals.sum(),
            initiating_party: common::PartyIdentification::from(&self.initiator),
        }
    }
}

/// Random 32 character hex message id
pub fn generate_message_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Settings the builders need from [`Config`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    /// IBAN policy applied to every account
    pub iban_check: IbanCheck,
    /// Marshaler settings
    pub render: RenderConfig,
}

impl From<&Config> for BuilderOptions {
    fn from(config: &Config) -> Self {
        Self {
            iban_check: config.validation.iban_check(),
            render: config.render.clone(),
        }
    }
}

/// Installs the header once; a second call is a state error.
pub(crate) fn install_header(slot: &mut Option<GroupHeader>, header: GroupHeader) -> Result<()> {
    if slot.is_some() {
        return Err(Error::InvalidState("header already set".to_string()));
    }
    tracing::debug!(msg_id = %header.message_id, "group header set");
    *slot = Some(header);
    Ok(())
}

/// Header required before any group can be opened
pub(crate) fn require_header(slot: &mut Option<GroupHeader>) -> Result<&mut GroupHeader> {
    slot.as_mut()
        .ok_or_else(|| Error::InvalidState("group header must be set before opening a group".to_string()))
}

/// Push and hand back a reference to the new last element
pub(crate) fn push_last<T>(items: &mut Vec<T>, item: T) -> &mut T {
    items.push(item);
    let last = items.len() - 1;
    &mut items[last]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2012, 9, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_generated_message_id() {
        let header = GroupHeader::new(None, "Bedrijf", timestamp()).unwrap();
        assert_eq!(header.message_id().len(), 32);
        assert!(header.message_id().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(generate_message_id(), generate_message_id());
    }

    #[test]
    fn test_message_id_bounds() {
        assert!(GroupHeader::new(Some("1"), "Bedrijf", timestamp()).is_ok());
        assert!(GroupHeader::new(Some(&"9".repeat(35)), "Bedrijf", timestamp()).is_ok());
        assert!(GroupHeader::new(Some(&"9".repeat(36)), "Bedrijf", timestamp()).is_err());
        assert!(GroupHeader::new(Some(""), "Bedrijf", timestamp()).is_err());
        assert!(GroupHeader::new(Some("1"), "", timestamp()).is_err());
    }

    #[test]
    fn test_document_header() {
        let header = GroupHeader::new(Some("000001"), "Bedrijf", timestamp()).unwrap();
        let doc = header.to_document();
        assert_eq!(doc.creation_date_time, "2012-09-20T10:00:00");
        assert_eq!(doc.number_of_transactions, 0);
        assert_eq!(doc.initiating_party.name.as_deref(), Some("Bedrijf"));
    }

    #[test]
    fn test_install_header_once() {
        let mut slot = None;
        assert!(matches!(require_header(&mut slot), Err(Error::InvalidState(_))));

        let header = GroupHeader::new(Some("A"), "Bedrijf", timestamp()).unwrap();
        install_header(&mut slot, header.clone()).unwrap();
        assert!(matches!(
            install_header(&mut slot, header),
            Err(Error::InvalidState(_))
        ));
        assert_eq!(require_header(&mut slot).unwrap().message_id(), "A");
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.validation.iban_checksum = true;
        let options = BuilderOptions::from(&config);
        assert_eq!(options.iban_check, IbanCheck::Checksum);
        assert_eq!(options.render.indent, 2);
    }
}

use tracing::info;

use super::{DeliveryError, Mail, MailSender, RegulatorGateway, RegulatorReport};

/// Mail transport that only records the message in the log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMailSender;

impl MailSender for TracingMailSender {
    fn send_mail(&self, mail: Mail) -> Result<(), DeliveryError> {
        info!(
            from = %mail.from,
            to = %mail.to.join(", "),
            subject = %mail.subject,
            "mail dispatched"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRegulatorGateway;

impl RegulatorGateway for TracingRegulatorGateway {
    fn submit(&self, report: RegulatorReport) -> Result<(), DeliveryError> {
        let codes = report
            .place_codes
            .iter()
            .map(|code| code.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let travelers = report
            .traveler_ids
            .iter()
            .map(|id| id.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        info!(places = %codes, travelers = %travelers, "regulator notified of high-value tour");
        Ok(())
    }
}

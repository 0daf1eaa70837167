//! Maps locally raised errors onto the alert a peer should be sent.

use crate::alert::AlertDescription;
use crate::errors::{ErrorCode, ErrorType, InternalError, ProtocolError, UsageError};

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The error is never reported to the peer.
    #[error("no alert applicable to this error")]
    NoAlert,
    /// The error has no entry in the translation table.
    #[error("no alert translation is implemented for this error")]
    Unimplemented,
}

impl From<TranslateError> for ErrorCode {
    fn from(e: TranslateError) -> Self {
        match e {
            TranslateError::NoAlert => ErrorCode::Usage(UsageError::NoAlert),
            TranslateError::Unimplemented => ErrorCode::Internal(InternalError::Unimplemented),
        }
    }
}

/// The alert for a protocol error, or `None` if the error is deliberately
/// not reported.
pub fn protocol_alert(error: ProtocolError) -> Option<AlertDescription> {
    use ProtocolError::*;

    match error {
        MissingExtension => Some(AlertDescription::MissingExtension),

        // BadMessage is also raised for conditions that should be reported as
        // illegal_parameter. Peers already see unexpected_message for all of
        // them, so splitting it needs a new error code first.
        BadMessage => Some(AlertDescription::UnexpectedMessage),

        // RFC 5746 3.4: "abort the handshake" means sending a fatal
        // handshake_failure alert.
        NoRenegotiation => Some(AlertDescription::HandshakeFailure),

        Encrypt
        | Decrypt
        | UnexpectedCertRequest
        | KeyInit
        | KeyDestroy
        | DhSerializing
        | DhSharedSecret
        | DhWritingPublicKey
        | DhFailedSigning
        | DhCopyingParameters
        | DhGeneratingParameters
        | CipherNotSupported
        | NoApplicationProtocol
        | FallbackDetected
        | HashDigestFailed
        | HashInitFailed
        | HashUpdateFailed
        | HashCopyFailed
        | HashWipeFailed
        | HashNotReady
        | AllowMd5ForFipsFailed
        | DecodeCertificate
        | DecodePrivateKey
        | InvalidHelloRetry
        | InvalidSignatureAlgorithm
        | InvalidSignatureScheme
        | NoValidSignatureScheme
        | CbcVerify
        | DhCopyingPublicKey
        | Sign
        | VerifySignature
        | EcdheGenKey
        | EcdheSharedSecret
        | EcdheUnsupportedCurve
        | EcdsaUnsupportedCurve
        | EcdheSerializing
        | KemUnsupportedParams
        | ShutdownRecordType
        | ShutdownClosed
        | NonEmptyRenegotiationInfo
        | RecordLimit
        | CertUntrusted
        | CertRevoked
        | CertNotYetValid
        | CertExpired
        | CertTypeUnsupported
        | CertInvalid
        | CertMaxChainDepthExceeded
        | CertRejected
        | CrlLookupFailed
        | CrlSignature
        | CrlIssuer
        | CrlUnhandledCriticalExtension
        | CrlInvalidThisUpdate
        | CrlInvalidNextUpdate
        | CrlNotYetValid
        | CrlExpired
        | InvalidMaxFragLen
        | MaxFragLenMismatch
        | ProtocolVersionUnsupported
        | BadKeyShare
        | Cancelled
        | ProtocolDowngradeDetected
        | MaxInnerPlaintextSize
        | RecordStufferSize
        | FragmentLengthTooLarge
        | FragmentLengthTooSmall
        | RecordStufferNeedsDraining
        | UnsupportedExtension
        | DuplicateExtension
        | MaxEarlyDataSize
        | EarlyDataTrialDecrypt
        | KtlsKeyUpdate => None,
    }
}

/// Translates an error into the alert description to send.
///
/// I/O and internal failures all become `internal_error` so nothing about
/// the local failure leaks to the peer.
pub fn error_to_alert(code: ErrorCode) -> Result<AlertDescription, TranslateError> {
    match code {
        ErrorCode::Ok | ErrorCode::Closed | ErrorCode::Blocked(_) | ErrorCode::Usage(_) | ErrorCode::Alert => {
            Err(TranslateError::NoAlert)
        }
        ErrorCode::Protocol(e) => protocol_alert(e).ok_or(TranslateError::NoAlert),
        ErrorCode::Io | ErrorCode::Internal(_) => Ok(AlertDescription::InternalError),
    }
}

/// Like [`error_to_alert`], for packed error codes. A code inside the
/// protocol range with no declared value, or outside every category, is
/// `Unimplemented`.
pub fn code_to_alert(code: u32) -> Result<u8, TranslateError> {
    if let Some(code) = ErrorCode::from_code(code) {
        return error_to_alert(code).map(|alert| alert as u8);
    }
    match ErrorType::of(code) {
        Some(ErrorType::Io) | Some(ErrorType::Internal) => Ok(AlertDescription::InternalError as u8),
        Some(ErrorType::Protocol) | None => Err(TranslateError::Unimplemented),
        Some(_) => Err(TranslateError::NoAlert),
    }
}

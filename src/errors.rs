//! Layered error taxonomy.
//!
//! Every failure belongs to exactly one [`ErrorType`] category. Within a
//! category each code has a value, and the pair packs into a single `u32` as
//! `(category << 26) | value` for callers that still expect a flat integer.
//! Codes are only ever appended to the end of their category's table so
//! that packed values stay stable.

use crate::alert::AlertDescription;
use crate::last_error;
use crate::translate;

use num_traits::FromPrimitive;
use std::fmt;
use std::io;
use std::panic::Location;
use thiserror::Error;

/// Number of low bits holding the value within a category.
pub const ERROR_VALUE_BITS: u32 = 26;
const ERROR_VALUE_MASK: u32 = (1 << ERROR_VALUE_BITS) - 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Primitive)]
#[repr(u32)]
pub enum ErrorType {
    Ok = 0,
    Io = 1,
    Closed = 2,
    Blocked = 3,
    Alert = 4,
    Protocol = 5,
    Internal = 6,
    Usage = 7,
}

impl ErrorType {
    pub const ALL: [ErrorType; 8] = [
        ErrorType::Ok,
        ErrorType::Io,
        ErrorType::Closed,
        ErrorType::Blocked,
        ErrorType::Alert,
        ErrorType::Protocol,
        ErrorType::Internal,
        ErrorType::Usage,
    ];

    /// First packed code of the category.
    pub fn start(self) -> u32 {
        (self as u32) << ERROR_VALUE_BITS
    }

    /// One past the last declared packed code of the category.
    pub fn end(self) -> u32 {
        let declared = match self {
            ErrorType::Ok | ErrorType::Io | ErrorType::Closed | ErrorType::Alert => 1,
            ErrorType::Blocked => BlockedError::ALL.len(),
            ErrorType::Protocol => ProtocolError::ALL.len(),
            ErrorType::Internal => InternalError::ALL.len(),
            ErrorType::Usage => UsageError::ALL.len(),
        };
        self.start() + declared as u32
    }

    /// Projects the category out of a packed code. Codes outside the eight
    /// declared categories have no category.
    pub fn of(code: u32) -> Option<ErrorType> {
        ErrorType::from_u32(code >> ERROR_VALUE_BITS)
    }
}

macro_rules! error_codes {
    ($(#[$meta:meta])* pub enum $name:ident { $($variant:ident => $msg:literal,)* }) => {
        $(#[$meta])*
        #[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $(
                #[error($msg)]
                $variant,
            )*
        }

        impl $name {
            /// Every code of the category, in declaration (and value) order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn from_value(value: u32) -> Option<Self> {
                Self::ALL.get(value as usize).copied()
            }

            pub fn value(self) -> u32 {
                self as u32
            }
        }
    };
}

error_codes! {
    pub enum BlockedError {
        IoBlocked => "underlying I/O operation would block",
        AsyncBlocked => "blocked on external async pkey operation",
        EarlyDataBlocked => "blocked waiting for early data",
        AppDataBlocked => "blocked waiting for application data",
    }
}

error_codes! {
    /// Violations of the TLS protocol detected locally.
    pub enum ProtocolError {
        Encrypt => "error encrypting data",
        Decrypt => "error decrypting data",
        BadMessage => "bad message encountered",
        UnexpectedCertRequest => "client received an unexpected certificate request",
        KeyInit => "error initializing encryption key",
        KeyDestroy => "error destroying encryption key",
        DhSerializing => "error serializing Diffie-Hellman parameters",
        DhSharedSecret => "error computing Diffie-Hellman shared secret",
        DhWritingPublicKey => "error writing Diffie-Hellman public key",
        DhFailedSigning => "error signing Diffie-Hellman values",
        DhCopyingParameters => "error copying Diffie-Hellman parameters",
        DhGeneratingParameters => "error generating Diffie-Hellman parameters",
        CipherNotSupported => "cipher is not supported",
        NoApplicationProtocol => "no supported application protocol to negotiate",
        FallbackDetected => "TLS fallback detected",
        HashDigestFailed => "failed to create hash digest",
        HashInitFailed => "error initializing hash",
        HashUpdateFailed => "error updating hash",
        HashCopyFailed => "error copying hash",
        HashWipeFailed => "error wiping hash",
        HashNotReady => "hash not in a valid state for the attempted operation",
        AllowMd5ForFipsFailed => "error allowing MD5 to be used when in FIPS mode",
        DecodeCertificate => "error decoding certificate",
        DecodePrivateKey => "error decoding private key",
        InvalidHelloRetry => "invalid hello retry request",
        InvalidSignatureAlgorithm => "invalid signature algorithm",
        InvalidSignatureScheme => "invalid signature scheme",
        NoValidSignatureScheme => "no valid signature scheme for certificate",
        CbcVerify => "failed CBC verification",
        DhCopyingPublicKey => "error copying Diffie-Hellman public key",
        Sign => "error signing data",
        VerifySignature => "error verifying signature",
        EcdheGenKey => "failed to generate an ECDHE key",
        EcdheSharedSecret => "error computing ECDHE shared secret",
        EcdheUnsupportedCurve => "unsupported EC curve was presented during an ECDHE handshake",
        EcdsaUnsupportedCurve => "unsupported EC curve was presented during an ECDSA signature",
        EcdheSerializing => "error serializing ECDHE public",
        KemUnsupportedParams => "unsupported KEM params were presented during a handshake",
        ShutdownRecordType => "non alert record received during shutdown",
        ShutdownClosed => "peer closed before shutdown completed",
        NonEmptyRenegotiationInfo => "renegotiation_info should be empty",
        RecordLimit => "TLS record limit reached",
        CertUntrusted => "certificate is untrusted",
        CertRevoked => "certificate has been revoked",
        CertNotYetValid => "certificate is not yet valid",
        CertExpired => "certificate has expired",
        CertTypeUnsupported => "certificate type is unsupported",
        CertInvalid => "certificate is invalid",
        CertMaxChainDepthExceeded => "the maximum certificate chain depth has been exceeded",
        CertRejected => "certificate was rejected by the validation callback",
        CrlLookupFailed => "no CRL could be found for the corresponding certificate",
        CrlSignature => "the signature of the CRL is invalid",
        CrlIssuer => "unable to get the CRL issuer certificate",
        CrlUnhandledCriticalExtension => "the CRL contains an unhandled critical extension",
        CrlInvalidThisUpdate => "the CRL contains an invalid thisUpdate field",
        CrlInvalidNextUpdate => "the CRL contains an invalid nextUpdate field",
        CrlNotYetValid => "the CRL is not yet valid",
        CrlExpired => "the CRL has expired",
        InvalidMaxFragLen => "invalid maximum fragment length encountered",
        MaxFragLenMismatch => "negotiated maximum fragment length does not match the requested value",
        ProtocolVersionUnsupported => "TLS protocol version is not supported by the configuration",
        BadKeyShare => "bad key share received",
        Cancelled => "handshake was cancelled",
        ProtocolDowngradeDetected => "protocol downgrade detected by client",
        MaxInnerPlaintextSize => "inner plaintext size exceeds limit",
        RecordStufferSize => "record stuffer out of space",
        FragmentLengthTooLarge => "fragment length is too large",
        FragmentLengthTooSmall => "fragment length is too small",
        RecordStufferNeedsDraining => "record stuffer needs to be drained first",
        MissingExtension => "mandatory extension not received",
        UnsupportedExtension => "illegal use of a known, supported extension",
        DuplicateExtension => "duplicate extension detected",
        MaxEarlyDataSize => "maximum early data bytes exceeded",
        EarlyDataTrialDecrypt => "unable to decrypt rejected early data",
        NoRenegotiation => "only secure, server-initiated renegotiation is supported",
        KtlsKeyUpdate => "received a KeyUpdate from the peer while kTLS was enabled",
    }
}

error_codes! {
    /// Failures inside the implementation itself.
    pub enum InternalError {
        Madvise => "error calling madvise",
        Alloc => "error allocating memory",
        Mlock => "error calling mlock",
        Munlock => "error calling munlock",
        Fstat => "error calling fstat",
        Open => "error calling open",
        Mmap => "error calling mmap",
        Atexit => "error calling atexit",
        Nomem => "no memory",
        Null => "null pointer encountered",
        Safety => "a safety check failed",
        Initialized => "library has already been initialized",
        NotInitialized => "library has not been initialized",
        RandomUninitialized => "random number generator is uninitialized",
        OpenRandom => "error opening urandom",
        ResizeStaticStuffer => "cannot resize a static stuffer",
        ResizeTaintedStuffer => "cannot resize a tainted stuffer",
        StufferOutOfData => "stuffer is out of data",
        StufferIsFull => "stuffer is full",
        StufferNotFound => "stuffer expected bytes were not found",
        StufferHasUnprocessedData => "stuffer has unprocessed data",
        HashInvalidAlgorithm => "invalid hash algorithm",
        PrfInvalidAlgorithm => "invalid prf hash algorithm",
        PrfInvalidSeed => "invalid prf seeds provided",
        PrfDerive => "error deriving a secret from the prf",
        PHashInvalidAlgorithm => "invalid p_hash algorithm",
        PHashInitFailed => "error initializing p_hash",
        PHashUpdateFailed => "error updating p_hash",
        PHashFinalFailed => "error creating p_hash digest",
        PHashWipeFailed => "error wiping p_hash",
        HmacInvalidAlgorithm => "invalid HMAC algorithm",
        HkdfOutputSize => "invalid HKDF output size",
        Hkdf => "error generating HKDF output",
        AlertPresent => "TLS alert is already pending",
        HandshakeState => "invalid handshake state encountered",
        ShutdownPaused => "shutdown is paused",
        SizeMismatch => "size mismatch",
        Drbg => "error using determinstic random bit generator",
        DrbgRequestSize => "request for too much entropy",
        KeyCheck => "invalid key",
        CipherType => "unknown cipher type used",
        MapDuplicate => "duplicate map key inserted",
        MapImmutable => "attempt to update an immutable map",
        MapMutable => "attempt to lookup a mutable map",
        MapInvalidMapSize => "attempt to create a map with 0 capacity",
        InitialHmac => "error calling initial HMAC",
        InvalidNonceType => "invalid nonce type",
        Unimplemented => "unimplemented feature",
        HandshakeUnreachable => "this message type should be unreachable during the handshake",
        Read => "error calling read",
        Write => "error calling write",
        BadFd => "invalid file descriptor",
        RdrandFailed => "error executing rdrand instruction",
        FailedCacheRetrieval => "failed cache retrieval",
        X509TrustStore => "error initializing the trust store",
        UnknownProtocolVersion => "error determining the protocol version",
        NullCnName => "error parsing CN names",
        NullSans => "error parsing SANs",
        ClientHelloVersion => "could not get client hello version",
        ClientProtocolVersion => "could not get client protocol version",
        ServerProtocolVersion => "could not get server protocol version",
        ActualProtocolVersion => "could not get actual protocol version",
        PollingFromSocket => "error polling from socket",
        RecvStufferFromConn => "error receiving stuffer from connection",
        SendStufferToConn => "error sending stuffer to connection",
        PreconditionViolation => "precondition violation",
        PostconditionViolation => "postcondition violation",
        IntegerOverflow => "integer overflow violation",
        ArrayIndexOob => "array index out of bounds",
        FreeStaticBlob => "cannot free a static blob",
        ResizeStaticBlob => "cannot resize a static blob",
        NoSupportedLibcryptoApi => "no supported libcrypto API found",
        RecordLengthTooLarge => "record length exceeds protocol version maximum",
        SetDuplicateValue => "set already contains the provided value",
        InvalidParsedExtensions => "parsed extensions are invalid",
        AsyncCallbackFailed => "callback associated with async private keys function has failed",
        AsyncMoreThanOne => "only one asynchronous operation can be in-progress at the same time",
        PqCrypto => "error in PQ crypto code",
        InvalidCertState => "certificate state is invalid",
        InvalidEarlyDataState => "early data in invalid state",
        PkeyCtxInit => "unable to initialize the libcrypto pkey context",
        ForkDetectionInit => "fork detection initialization failed",
        RetrieveForkGenerationNumber => "failed to retrieve the fork generation number",
        LibcryptoVersionNumberMismatch => "the libcrypto major version number seen at compile-time is different from the one seen at run-time",
        LibcryptoVersionNameMismatch => "the libcrypto major version name seen at compile-time is different from the one seen at run-time",
        OsslProvider => "failed to load or unload an OpenSSL provider",
        TestAssertion => "test assertion failed",
    }
}

error_codes! {
    /// Misuse of the API by the caller.
    pub enum UsageError {
        NoAlert => "no alert applicable to this error",
        ServerMode => "operation not allowed in server mode",
        ClientMode => "operation not allowed in client mode",
        ClientModeDisabled => "client connections not allowed",
        TooManyCertificates => "only 1 certificate is supported in client mode",
        TooManySignatureSchemes => "max supported length of signature scheme preference list exceeded",
        ClientAuthNotSupportedInFipsMode => "client auth not supported in FIPS mode",
        InvalidBase64 => "invalid base64 encountered",
        InvalidHex => "invalid HEX encountered",
        InvalidPem => "invalid PEM encountered",
        DhParamsCreate => "error creating Diffie-Hellman parameters",
        DhTooSmall => "Diffie-Hellman parameters are too small",
        DhParameterCheck => "Diffie-Hellman parameter check failed",
        InvalidPkcs3 => "invalid PKCS3 encountered",
        NoCertificateInPem => "no certificate in PEM",
        ServerNameTooLong => "server name is too long",
        NumDefaultCertificates => "exceeded max default certificates or provided no default",
        MultipleDefaultCertificatesPerAuthType => "setting multiple default certificates per auth type is not allowed",
        InvalidCipherPreferences => "invalid cipher preferences version",
        InvalidApplicationProtocol => "the supplied application protocol name is invalid",
        KeyMismatch => "public and private key do not match",
        SendSize => "retried send used a different size",
        CorkSetOnUnmanaged => "attempt to set connection cork management on unmanaged IO",
        UnrecognizedExtension => "TLS extension not recognized",
        ExtensionNotReceived => "TLS extension not received",
        InvalidSctList => "SCT list is invalid",
        InvalidOcspResponse => "OCSP response is invalid",
        UpdatingExtension => "updating extension data failed",
        InvalidSerializedSessionState => "serialized session state is not in valid format",
        SerializedSessionStateTooLong => "serialized session state is too long",
        SessionIdTooLong => "session id is too long",
        ClientAuthNotSupportedInSessionResumptionMode => "client auth not supported in session resumption mode",
        InvalidTicketKeyLength => "session ticket key length cannot be zero",
        InvalidTicketKeyNameOrNameLength => "invalid session ticket key name or name length",
        TicketKeyNotUnique => "cannot add session ticket key because it was added before",
        TicketKeyLimit => "limit reached for unexpired session ticket keys",
        NoTicketEncryptDecryptKey => "no key in encrypt-decrypt state is available to encrypt session ticket",
        EncryptDecryptKeySelectionFailed => "failed to select a key from keys in encrypt-decrypt state",
        KeyUsedInSessionTicketNotFound => "key used in already assigned session ticket not found for decryption",
        SendingNst => "error in session ticket status encountered before sending NST",
        InvalidDynamicThreshold => "invalid dynamic record threshold",
        InvalidArgument => "an invalid argument was provided",
        NotInUnitTest => "illegal configuration, can only be used during unit tests",
        NotInTest => "illegal configuration, can only be used during unit or integration tests",
        UnsupportedCpu => "unsupported CPU architecture",
        SessionIdTooShort => "session id is too short",
        ConnectionCachingDisallowed => "this connection is not allowed to be cached",
        SessionTicketNotSupported => "session ticket not supported for this connection",
        OcspNotSupported => "OCSP stapling was requested, but is not supported",
        InvalidSignatureAlgorithmsPreferences => "invalid signature algorithms preferences version",
        RsaPssNotSupported => "RSA-PSS signing not supported by underlying libcrypto implementation",
        InvalidEccPreferences => "invalid ECC preferences version",
        InvalidSecurityPolicy => "invalid security policy",
        InvalidKemPreferences => "invalid KEM preferences version",
        AsyncAlreadyPerformed => "async operation was already performed, cannot perform it again",
        AsyncNotPerformed => "async operation is not performed, cannot apply its result",
        AsyncWrongConnection => "async private key operation can only be consumed by connection which initiated it",
        AsyncAlreadyApplied => "async operation was already applied to connection, cannot apply it again",
        UnsupportedWithQuic => "functionality not supported when running with QUIC support enabled",
        DuplicatePskIdentities => "the list of pre-shared keys provided contains duplicate psk identities",
        OfferedPsksTooLong => "the total pre-shared key data is too long to send over the wire",
        InvalidSessionTicket => "session ticket data is not valid",
        Reentrancy => "original execution must complete before method can be called again",
        InvalidState => "invalid state, this is the result of invalid use of an API",
        EarlyDataNotAllowed => "early data is not allowed by the connection",
        NoCertFound => "certificate not found",
        CertNotValidated => "certificate not validated",
        NoPrivateKey => "certificate has no private key",
        PskMode => "mixing resumption and external PSKs is not supported",
        X509ExtensionValueNotFound => "X509 extension value not found",
        InvalidX509ExtensionType => "invalid X509 extension type",
        InsufficientMemSize => "the provided buffer size is not large enough to contain the output data",
        KeyingMaterialExpired => "the lifetime of the connection keying material has exceeded the limit",
        SecretScheduleState => "correct inputs to secret calculation not available",
        CertOwnership => "certificate ownership does not match the requested operation",
        InternalLibcryptoError => "an internal error has occurred in the libcrypto API",
        HandshakeNotComplete => "operation is only allowed after the handshake is complete",
        KtlsManagedIo => "kTLS cannot be enabled while custom I/O is configured for the connection",
        KtlsUnsupportedPlatform => "kTLS is unsupported on this platform",
        KtlsUnsupportedConn => "kTLS is unsupported for this connection",
        KtlsEnable => "an error occurred when attempting to enable kTLS for socket",
        KtlsBadCmsg => "an error occurred when attempting to send or receive a control message",
        KtlsReneg => "kTLS does not support secure renegotiation",
        Atomic => "atomic operations in this environment would require locking",
        KtlsKeyLimit => "TLS record limit reached for kTLS with TLS1.2",
        SecurityPolicyIncompatibleCert => "unsupported certificate found in the security policy",
    }
}

/// A single error code, tagged with its category.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    #[error("no error")]
    Ok,
    #[error("underlying I/O operation failed, check system errno")]
    Io,
    #[error("connection is closed")]
    Closed,
    #[error("{0}")]
    Blocked(BlockedError),
    #[error("TLS alert received")]
    Alert,
    #[error("{0}")]
    Protocol(ProtocolError),
    #[error("{0}")]
    Internal(InternalError),
    #[error("{0}")]
    Usage(UsageError),
}

impl ErrorCode {
    pub fn error_type(&self) -> ErrorType {
        match self {
            ErrorCode::Ok => ErrorType::Ok,
            ErrorCode::Io => ErrorType::Io,
            ErrorCode::Closed => ErrorType::Closed,
            ErrorCode::Blocked(_) => ErrorType::Blocked,
            ErrorCode::Alert => ErrorType::Alert,
            ErrorCode::Protocol(_) => ErrorType::Protocol,
            ErrorCode::Internal(_) => ErrorType::Internal,
            ErrorCode::Usage(_) => ErrorType::Usage,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.error_type() == ErrorType::Blocked
    }

    /// Packed `(category << 26) | value` form.
    pub fn code(&self) -> u32 {
        let value = match *self {
            ErrorCode::Ok | ErrorCode::Io | ErrorCode::Closed | ErrorCode::Alert => 0,
            ErrorCode::Blocked(e) => e.value(),
            ErrorCode::Protocol(e) => e.value(),
            ErrorCode::Internal(e) => e.value(),
            ErrorCode::Usage(e) => e.value(),
        };
        self.error_type().start() | value
    }

    /// Inverse of [`ErrorCode::code`]. `None` for anything outside the
    /// declared ranges.
    pub fn from_code(code: u32) -> Option<ErrorCode> {
        let value = code & ERROR_VALUE_MASK;
        match ErrorType::of(code)? {
            ErrorType::Ok if value == 0 => Some(ErrorCode::Ok),
            ErrorType::Io if value == 0 => Some(ErrorCode::Io),
            ErrorType::Closed if value == 0 => Some(ErrorCode::Closed),
            ErrorType::Alert if value == 0 => Some(ErrorCode::Alert),
            ErrorType::Ok | ErrorType::Io | ErrorType::Closed | ErrorType::Alert => None,
            ErrorType::Blocked => BlockedError::from_value(value).map(ErrorCode::Blocked),
            ErrorType::Protocol => ProtocolError::from_value(value).map(ErrorCode::Protocol),
            ErrorType::Internal => InternalError::from_value(value).map(ErrorCode::Internal),
            ErrorType::Usage => UsageError::from_value(value).map(ErrorCode::Usage),
        }
    }
}

impl From<BlockedError> for ErrorCode {
    fn from(e: BlockedError) -> Self {
        ErrorCode::Blocked(e)
    }
}

impl From<ProtocolError> for ErrorCode {
    fn from(e: ProtocolError) -> Self {
        ErrorCode::Protocol(e)
    }
}

impl From<InternalError> for ErrorCode {
    fn from(e: InternalError) -> Self {
        ErrorCode::Internal(e)
    }
}

impl From<UsageError> for ErrorCode {
    fn from(e: UsageError) -> Self {
        ErrorCode::Usage(e)
    }
}

/// An [`ErrorCode`] together with the source location that raised it.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    origin: &'static Location<'static>,
}

impl Error {
    /// Raises `code` at the caller's location. The error is also recorded
    /// as the calling thread's last error.
    #[track_caller]
    pub fn new<C: Into<ErrorCode>>(code: C) -> Self {
        let err = Self {
            code: code.into(),
            origin: Location::caller(),
        };
        last_error::record(err);
        err
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorType {
        self.code.error_type()
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_blocking()
    }

    pub fn message(&self) -> String {
        self.code.to_string()
    }

    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    /// "Error encountered in <file>:<line>"
    pub fn debug(&self) -> String {
        let file = self.origin.file().rsplit('/').next().unwrap_or_else(|| self.origin.file());
        format!("Error encountered in {}:{}", file, self.origin.line())
    }

    /// The alert description this error would be reported to a peer as,
    /// if any.
    pub fn alert(&self) -> Option<AlertDescription> {
        translate::error_to_alert(self.code).ok()
    }
}

macro_rules! raise_from {
    ($($code:ty),*) => {
        $(
            impl From<$code> for Error {
                #[track_caller]
                fn from(code: $code) -> Self {
                    Error::new(code)
                }
            }
        )*
    };
}

raise_from!(ErrorCode, BlockedError, ProtocolError, InternalError, UsageError);

impl From<io::Error> for Error {
    #[track_caller]
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::WouldBlock => Error::new(BlockedError::IoBlocked),
            _ => Error::new(ErrorCode::Io),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &format_args!("{:#010x}", self.code.code()))
            .field("name", &self.code)
            .field("message", &self.message())
            .field("kind", &self.kind())
            .field("debug", &self.debug())
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.code, f)
    }
}

impl std::error::Error for Error {}

impl From<Error> for io::Error {
    fn from(input: Error) -> Self {
        let kind = match input.kind() {
            ErrorType::Blocked => io::ErrorKind::WouldBlock,
            ErrorType::Closed => io::ErrorKind::NotConnected,
            ErrorType::Alert => io::ErrorKind::ConnectionAborted,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ranges_are_contiguous() {
        for pair in ErrorType::ALL.windows(2) {
            assert!(pair[0].end() <= pair[1].start());
        }
        assert_eq!(ErrorType::Protocol.start(), 5 << 26);
        assert_eq!(ErrorType::Protocol.end() - ErrorType::Protocol.start(), ProtocolError::ALL.len() as u32);
    }

    #[test]
    fn every_code_stays_inside_its_category() {
        let codes = BlockedError::ALL
            .iter()
            .map(|e| ErrorCode::from(*e))
            .chain(ProtocolError::ALL.iter().map(|e| ErrorCode::from(*e)))
            .chain(InternalError::ALL.iter().map(|e| ErrorCode::from(*e)))
            .chain(UsageError::ALL.iter().map(|e| ErrorCode::from(*e)))
            .chain(vec![ErrorCode::Ok, ErrorCode::Io, ErrorCode::Closed, ErrorCode::Alert]);
        for code in codes {
            let packed = code.code();
            let category = code.error_type();
            assert_eq!(ErrorType::of(packed), Some(category));
            assert!(category.start() <= packed && packed < category.end(), "{:?}", code);
            assert_eq!(ErrorCode::from_code(packed), Some(code));
        }
    }

    #[test]
    fn packed_values_match_declaration_order() {
        assert_eq!(ErrorCode::Io.code(), 1 << 26);
        assert_eq!(ErrorCode::Protocol(ProtocolError::Encrypt).code(), 5 << 26);
        assert_eq!(ErrorCode::Protocol(ProtocolError::BadMessage).code(), (5 << 26) | 2);
        assert_eq!(ErrorCode::Usage(UsageError::NoAlert).code(), 7 << 26);
    }

    #[test]
    fn undeclared_codes_do_not_decode() {
        assert_eq!(ErrorCode::from_code(ErrorType::Io.start() + 1), None);
        assert_eq!(ErrorCode::from_code(ErrorType::Protocol.end()), None);
        assert_eq!(ErrorCode::from_code(8 << 26), None);
        assert_eq!(ErrorType::of(u32::MAX), None);
    }

    #[test]
    fn only_blocked_codes_block() {
        assert!(ErrorCode::Blocked(BlockedError::IoBlocked).is_blocking());
        assert!(ErrorCode::Blocked(BlockedError::AppDataBlocked).is_blocking());
        assert!(!ErrorCode::Io.is_blocking());
        assert!(!ErrorCode::Alert.is_blocking());
    }

    #[test]
    fn error_carries_origin() {
        let err = Error::new(ProtocolError::BadMessage);
        assert_eq!(err.kind(), ErrorType::Protocol);
        assert!(err.debug().starts_with("Error encountered in errors.rs:"));
        assert_eq!(err.to_string(), "bad message encountered");
        assert!(!err.is_retryable());
    }

    #[test]
    fn blocked_error_becomes_would_block() {
        let err = Error::new(BlockedError::IoBlocked);
        assert!(err.is_retryable());
        let io_err = io::Error::from(err);
        assert_eq!(io_err.kind(), io::ErrorKind::WouldBlock);
        assert!(io_err.into_inner().is_some());
    }

    #[test]
    fn io_errors_are_classified() {
        let err = Error::from(io::Error::new(io::ErrorKind::WouldBlock, "again"));
        assert!(err.is_retryable());
        let err = Error::from(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert_eq!(err.code(), ErrorCode::Io);
    }

    #[test]
    fn other_errors_become_other() {
        let io_err = io::Error::from(Error::new(ErrorCode::Io));
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
        let io_err = io::Error::from(Error::new(ErrorCode::Alert));
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionAborted);
    }
}

//! The entities that uploads are normalized into.
//!
//! Contigsets and binsets belong to an [`Owner`]. Contigs belong to a
//! contigset and bins belong to a binset. Which contigs are members of which
//! bins is not stored on either entity; it is an association between
//! [`BinId`]s and [`ContigId`]s kept by the
//! [`Repository`](crate::Repository).

/// The maximum length of a contigset or binset name.
pub const MAX_SET_NAME_LEN: usize = 50;

/// The maximum length of a contig header.
pub const MAX_HEADER_LEN: usize = 120;

/// The maximum length of a bin name.
pub const MAX_BIN_NAME_LEN: usize = 50;

/// Creates a newtype around a `u64` identifier.
macro_rules! id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Gets the inner value.
            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id!(
    /// The identifier of a [`Contigset`].
    ContigsetId
);

id!(
    /// The identifier of a [`Contig`].
    ContigId
);

id!(
    /// The identifier of a [`Binset`].
    BinsetId
);

id!(
    /// The identifier of a [`Bin`].
    BinId
);

/// The opaque identifier of whoever uploaded a set (usually a session).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Owner(String);

impl Owner {
    /// Creates a new [`Owner`].
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Gets the owner as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Owner {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Owner {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named collection of contigs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contigset {
    /// The identifier.
    id: ContigsetId,

    /// The name (unique per owner).
    name: String,

    /// The owner.
    owner: Owner,
}

impl Contigset {
    /// Creates a new [`Contigset`].
    pub fn new(id: ContigsetId, name: impl Into<String>, owner: Owner) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
        }
    }

    /// The name given to a contigset that was created implicitly.
    ///
    /// Implicit names are `contigset` followed by a number, which starts at
    /// the identifier of the new contigset.
    ///
    /// # Examples
    ///
    /// ```
    /// use binchord::entity::Contigset;
    ///
    /// assert_eq!(Contigset::auto_name(4), "contigset4");
    /// ```
    pub fn auto_name(n: u64) -> String {
        format!("contigset{n}")
    }

    /// Gets the identifier.
    pub fn id(&self) -> ContigsetId {
        self.id
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the owner.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }
}

/// A single assembled sequence fragment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contig {
    /// The identifier.
    id: ContigId,

    /// The header (unique within the contigset).
    header: String,

    /// The sequence, if one was uploaded.
    sequence: Option<String>,

    /// The contigset this contig belongs to.
    contigset: ContigsetId,
}

impl Contig {
    /// Creates a new [`Contig`].
    pub fn new(
        id: ContigId,
        header: impl Into<String>,
        sequence: Option<String>,
        contigset: ContigsetId,
    ) -> Self {
        Self {
            id,
            header: header.into(),
            sequence,
            contigset,
        }
    }

    /// Gets the identifier.
    pub fn id(&self) -> ContigId {
        self.id
    }

    /// Gets the header.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Gets the sequence.
    ///
    /// Contigs that were only ever named in an assignment file have no
    /// sequence.
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    /// Gets the contigset this contig belongs to.
    pub fn contigset(&self) -> ContigsetId {
        self.contigset
    }
}

/// The fields of a contig that has not been created yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewContig {
    /// The header.
    pub header: String,

    /// The sequence, if any.
    pub sequence: Option<String>,
}

/// A named collection of bins.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binset {
    /// The identifier.
    id: BinsetId,

    /// The name (unique per owner).
    name: String,

    /// The owner.
    owner: Owner,
}

impl Binset {
    /// Creates a new [`Binset`].
    pub fn new(id: BinsetId, name: impl Into<String>, owner: Owner) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
        }
    }

    /// Gets the identifier.
    pub fn id(&self) -> BinsetId {
        self.id
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the owner.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }
}

/// A named cluster of contigs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bin {
    /// The identifier.
    id: BinId,

    /// The name (unique within the binset).
    name: String,

    /// The binset this bin belongs to.
    binset: BinsetId,
}

impl Bin {
    /// Creates a new [`Bin`].
    pub fn new(id: BinId, name: impl Into<String>, binset: BinsetId) -> Self {
        Self {
            id,
            name: name.into(),
            binset,
        }
    }

    /// Gets the identifier.
    pub fn id(&self) -> BinId {
        self.id
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the binset this bin belongs to.
    pub fn binset(&self) -> BinsetId {
        self.binset
    }
}

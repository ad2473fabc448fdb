//! RustCrypto `digest` integration for [`Hash`] and [`Hash224`]

#[cfg(feature = "traits010")]
use crate::sha256::{Hash, Hash224};

/// Wrapped `Hash` type for the `Digest` trait.
#[cfg(feature = "traits010")]
pub type WrappedHash = digest010::core_api::CoreWrapper<Hash>;

/// Wrapped `Hash224` type for the `Digest` trait.
#[cfg(feature = "traits010")]
pub type WrappedHash224 = digest010::core_api::CoreWrapper<Hash224>;

#[cfg(feature = "traits010")]
mod digest_trait010 {
    use core::fmt;

    use digest010::{
        block_buffer::Eager,
        const_oid::{AssociatedOid, ObjectIdentifier},
        consts::{U28, U32, U64},
        core_api::{
            AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, FixedOutputCore,
            OutputSizeUser, Reset, UpdateCore,
        },
        FixedOutput, FixedOutputReset, HashMarker, Output, Update,
    };

    use crate::sha256::{Hash, Hash224};

    macro_rules! impl_digest010 {
        ($hash:ident, $output_size:ty, $name:literal, $oid:literal) => {
            impl AssociatedOid for $hash {
                const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap($oid);
            }

            impl AlgorithmName for $hash {
                fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str($name)
                }
            }

            impl HashMarker for $hash {}

            impl BufferKindUser for $hash {
                type BufferKind = Eager;
            }

            impl BlockSizeUser for $hash {
                type BlockSize = U64;
            }

            impl OutputSizeUser for $hash {
                type OutputSize = $output_size;
            }

            impl UpdateCore for $hash {
                #[inline]
                fn update_blocks(&mut self, blocks: &[Block<Self>]) {
                    for block in blocks {
                        self._update(block);
                    }
                }
            }

            impl Update for $hash {
                #[inline]
                fn update(&mut self, data: &[u8]) {
                    self._update(data);
                }
            }

            impl FixedOutputCore for $hash {
                fn finalize_fixed_core(
                    &mut self,
                    buffer: &mut Buffer<Self>,
                    out: &mut Output<Self>,
                ) {
                    self._update(buffer.get_data());
                    self.finalize_into(out);
                }
            }

            impl FixedOutput for $hash {
                fn finalize_into(self, out: &mut Output<Self>) {
                    let h = self.finalize();
                    out.copy_from_slice(&h);
                }
            }

            impl Reset for $hash {
                fn reset(&mut self) {
                    *self = Self::new()
                }
            }

            impl FixedOutputReset for $hash {
                fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
                    self.finalize_into(out);
                    self.reset();
                }
            }
        };
    }

    impl_digest010!(Hash, U32, "Sha256", "2.16.840.1.101.3.4.2.1");
    impl_digest010!(Hash224, U28, "Sha224", "2.16.840.1.101.3.4.2.4");
}

#[cfg(feature = "traits09")]
mod digest_trait09 {
    use digest09::consts::{U28, U32, U64};
    use digest09::{BlockInput, FixedOutputDirty, Output, Reset, Update};

    use crate::sha256::{Hash, Hash224};

    macro_rules! impl_digest09 {
        ($hash:ident, $output_size:ty) => {
            impl BlockInput for $hash {
                type BlockSize = U64;
            }

            impl Update for $hash {
                fn update(&mut self, input: impl AsRef<[u8]>) {
                    self._update(input)
                }
            }

            impl FixedOutputDirty for $hash {
                type OutputSize = $output_size;

                fn finalize_into_dirty(&mut self, out: &mut Output<Self>) {
                    let h = self.finalize();
                    out.copy_from_slice(&h);
                }
            }

            impl Reset for $hash {
                fn reset(&mut self) {
                    *self = Self::new()
                }
            }
        };
    }

    impl_digest09!(Hash, U32);
    impl_digest09!(Hash224, U28);
}

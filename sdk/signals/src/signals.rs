use serde::{Deserialize, Serialize};

/// Public signals in the order the proving tool emits them
/// (circuit outputs first, then public inputs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeSignals<T>(Vec<T>);

/// Public signals in the order the verifier declares its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifierSignals<T>(Vec<T>);

macro_rules! signal_list {
    ($name:ident) => {
        impl<T> $name<T> {
            pub fn new(values: Vec<T>) -> Self {
                Self(values)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn as_slice(&self) -> &[T] {
                &self.0
            }

            pub fn iter(&self) -> std::slice::Iter<'_, T> {
                self.0.iter()
            }

            pub fn into_inner(self) -> Vec<T> {
                self.0
            }

            pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> $name<U> {
                $name(self.0.iter().map(f).collect())
            }
        }

        impl<'a, T> IntoIterator for &'a $name<T> {
            type Item = &'a T;
            type IntoIter = std::slice::Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

signal_list!(NativeSignals);
signal_list!(VerifierSignals);

impl<T, E> NativeSignals<Result<T, E>> {
    /// Fail on the first element that failed to convert
    pub fn transpose(self) -> Result<NativeSignals<T>, E> {
        self.0.into_iter().collect::<Result<Vec<_>, _>>().map(NativeSignals)
    }
}

impl<T, E> VerifierSignals<Result<T, E>> {
    pub fn transpose(self) -> Result<VerifierSignals<T>, E> {
        self.0
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map(VerifierSignals)
    }
}

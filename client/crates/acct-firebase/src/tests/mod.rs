mod firestore_document;
mod operation;
